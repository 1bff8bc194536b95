pub mod a001_comparison;
pub mod a002_client;
pub mod a003_reference;
pub mod common;
