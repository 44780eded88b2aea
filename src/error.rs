// Error definitions for validated hasher and statistics settings.

use thiserror::Error;

/// Errors raised while validating hasher or tracker settings.
///
/// Hashing and statistics updates themselves never fail; only the
/// constructors taking caller-supplied parameters do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("bit count {bits} is out of range (expected {min}..={max})")]
    InvalidBitCount { bits: u32, min: u32, max: u32 },

    #[error("rescale threshold {threshold} is out of range (expected {min}..={max})")]
    InvalidRescaleThreshold { threshold: u32, min: u32, max: u32 },
}
