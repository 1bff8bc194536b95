pub mod api_client;
pub mod api_utils;
pub mod clipboard;
pub mod date_utils;
pub mod number_format;
pub mod task;
pub mod url_utils;
