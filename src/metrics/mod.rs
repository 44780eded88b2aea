//! Metrics emitted through the `metrics` facade.
//
//! The library only records; installing a recorder/exporter is left to the embedding
//! application. Without one every call below is a no-op.

pub mod meter;

// Re-export commonly used items
pub use meter::*;
