// Package stats provides the counter rescale policy.

use crate::error::HashError;

/// Smallest accepted halving threshold.
pub const MIN_THRESHOLD: u32 = 2;
/// Largest accepted halving threshold: the largest positive balance a counter can hold.
pub const MAX_THRESHOLD: u32 = i32::MAX as u32;

/// Decides whether balance counters are ever brought back toward zero.
///
/// `Never` keeps counters growing without bound; after roughly 2^31 keys biased
/// toward one value a counter wraps and its balance signal is corrupted.
/// `Halve` divides every counter by two (toward zero) as soon as any counter's
/// magnitude reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescalePolicy {
    #[default]
    Never,
    Halve { threshold: u32 },
}

impl RescalePolicy {
    /// Builds a validated halving policy.
    pub fn halve(threshold: u32) -> Result<Self, HashError> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
            return Err(HashError::InvalidRescaleThreshold {
                threshold,
                min: MIN_THRESHOLD,
                max: MAX_THRESHOLD,
            });
        }
        Ok(Self::Halve { threshold })
    }

    /// Returns the threshold when halving is enabled.
    pub fn threshold(&self) -> Option<u32> {
        match self {
            Self::Never => None,
            Self::Halve { threshold } => Some(*threshold),
        }
    }
}
