// Package stats tracks per-bit balance of observed keys.

pub mod bit_stats;
pub mod rescale;


// Re-export main types
pub use bit_stats::{BitOrder, BitPosition, BitStats, TRACKED_BITS};
pub use rescale::RescalePolicy;
