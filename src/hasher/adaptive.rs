// Package hasher provides the adaptive bit-selection hasher.

use std::sync::Arc;

use tracing::debug;

use crate::error::HashError;
use crate::metrics;
use crate::stats::{BitOrder, BitPosition, BitStats};

/// Default number of key bits packed into each hash (results in `0..1024`).
pub const DEFAULT_BITS: u32 = 10;
pub const MIN_BITS: u32 = 1;
/// Results are `u32`, so at most 32 bits can be packed.
pub const MAX_BITS: u32 = 32;

/// Builds a default-width hasher over the process-wide tracker.
pub fn new_hasher() -> AdaptiveHasher {
    AdaptiveHasher::new(BitStats::global())
}

/// AdaptiveHasher extracts the currently most balanced key bits into a compact index.
///
/// The selection is the tracker's ordering at construction time and never changes
/// afterwards, so a key always maps to the same slot on one instance. Every `hash` call
/// still feeds the tracker, which only affects hashers built later.
#[derive(Debug, Clone)]
pub struct AdaptiveHasher {
    stats: Arc<BitStats>,
    selection: BitOrder,
    bits: u32,
}

impl AdaptiveHasher {
    /// Snapshots the tracker ordering and packs `DEFAULT_BITS` bits per hash.
    pub fn new(stats: Arc<BitStats>) -> Self {
        Self::snapshot(stats, DEFAULT_BITS)
    }

    /// Like [`new`](Self::new) with a custom width in `MIN_BITS..=MAX_BITS`.
    pub fn with_bits(stats: Arc<BitStats>, bits: u32) -> Result<Self, HashError> {
        validate_bits(bits)?;
        Ok(Self::snapshot(stats, bits))
    }

    fn snapshot(stats: Arc<BitStats>, bits: u32) -> Self {
        let selection = stats.compute_ordering();
        let selected = &selection[..bits as usize];
        metrics::add_hashers(1);
        debug!(
            component = "hasher",
            event = "snapshot_taken",
            bits,
            selected = ?selected,
            "adaptive hasher created"
        );
        Self {
            stats,
            selection,
            bits,
        }
    }

    /// Builds a new hasher over the same tracker and width with a fresh snapshot.
    pub fn refreshed(&self) -> Self {
        Self::snapshot(Arc::clone(&self.stats), self.bits)
    }

    /// Records the key in the tracker and returns its packed index in `0..capacity()`.
    pub fn hash(&self, key: u64) -> u32 {
        self.stats.update(key);
        self.extract(key)
    }

    /// Packs bit `selection[i]` of the key into bit `i` of the result, without
    /// touching the tracker.
    pub fn extract(&self, key: u64) -> u32 {
        self.selected()
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &pos)| acc | ((((key >> pos) & 1) as u32) << i))
    }

    /// The full frozen ordering; only the first `bits()` entries are used.
    pub fn selection(&self) -> &[BitPosition] {
        &self.selection
    }

    /// The positions actually packed into results, lowest output bit first.
    pub fn selected(&self) -> &[BitPosition] {
        &self.selection[..self.bits as usize]
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of distinct results, i.e. the table size this hasher indexes.
    pub fn capacity(&self) -> u64 {
        1u64 << self.bits
    }

    pub fn stats(&self) -> &Arc<BitStats> {
        &self.stats
    }
}

pub(crate) fn validate_bits(bits: u32) -> Result<(), HashError> {
    if !(MIN_BITS..=MAX_BITS).contains(&bits) {
        return Err(HashError::InvalidBitCount {
            bits,
            min: MIN_BITS,
            max: MAX_BITS,
        });
    }
    Ok(())
}
