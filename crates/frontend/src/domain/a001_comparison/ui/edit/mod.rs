pub mod header;
pub mod lives;
pub mod modals;
pub mod model;
pub mod network;
pub mod page;
pub mod picker;
pub mod plans;
pub mod view_model;

pub use page::ComparisonEdit;
