//! Common types shared by all aggregates

pub mod aggregate_id;
pub mod lenient;

// Re-exports
pub use aggregate_id::RefId;
