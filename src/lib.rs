//! Adaptive hashing of 64-bit keys into small table indices.
//!
//! [`BitStats`] keeps a running balance of ones versus zeros for every bit position of the
//! keys it sees. An [`AdaptiveHasher`] snapshots the positions closest to a 50/50 split when
//! it is built and packs those bits of each key into a `K`-bit index, while feeding every
//! hashed key back into the statistics for hashers built later.

#[path = "shared/sort/mod.rs"]
pub mod sort;
#[cfg(test)]
mod tests;

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod hasher;
pub mod metrics;
pub mod stats;

pub use error::HashError;
pub use hasher::{new_hasher, AdaptiveHasher, DEFAULT_BITS};
pub use stats::{BitOrder, BitPosition, BitStats, RescalePolicy, TRACKED_BITS};
