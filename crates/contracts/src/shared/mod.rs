pub mod envelope;
pub mod fallback;
