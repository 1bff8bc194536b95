pub mod dto;

pub use dto::{ClientListQuery, ClientRecord, NewClient};
