pub mod page;

pub use page::ReferencePage;
