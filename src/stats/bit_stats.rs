// Package stats provides the per-bit balance tracker.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use crate::hasher::AdaptiveHasher;
use crate::metrics;
use crate::sort;

use super::rescale::RescalePolicy;

/// Number of tracked bit positions: all bits of a 64-bit key except the sign bit.
pub const TRACKED_BITS: usize = 63;

/// Index of a bit inside a key, in `0..TRACKED_BITS`.
pub type BitPosition = u8;

/// Bit positions ordered from most balanced to most biased.
pub type BitOrder = [BitPosition; TRACKED_BITS];

static GLOBAL: Lazy<Arc<BitStats>> = Lazy::new(|| Arc::new(BitStats::new()));

/// BitStats keeps, per bit position, the running balance of ones seen minus zeros seen.
///
/// Counters are independent atomics. A single position is always counted exactly, but
/// the positions touched by one key are not updated as a unit, so a concurrent
/// [`compute_ordering`](Self::compute_ordering) may observe a key half-applied. The
/// ordering is advisory (it steers hash quality, never correctness), so this is accepted.
#[derive(Debug)]
pub struct BitStats {
    /// Balance counters indexed by bit position. Wrap on overflow.
    counts: [AtomicI32; TRACKED_BITS],
    /// Total number of keys passed through `update`.
    observed: AtomicU64,
    /// Value of `observed` last published to the metrics facade.
    published: AtomicU64,
    policy: RescalePolicy,
    /// Best-effort guard to avoid concurrent full-table halving.
    rescale_active: AtomicBool,
    /// Latched once the first wrap is reported.
    overflowed: AtomicBool,
}

impl BitStats {
    /// Creates a tracker with all counters at zero and no rescaling.
    pub fn new() -> Self {
        Self::with_policy(RescalePolicy::Never)
    }

    /// Creates a tracker with the given rescale policy.
    pub fn with_policy(policy: RescalePolicy) -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicI32::new(0)),
            observed: AtomicU64::new(0),
            published: AtomicU64::new(0),
            policy,
            rescale_active: AtomicBool::new(false),
            overflowed: AtomicBool::new(false),
        }
    }

    /// Returns the process-wide tracker, created on first access and never dropped.
    pub fn global() -> Arc<BitStats> {
        Arc::clone(&GLOBAL)
    }

    pub fn policy(&self) -> RescalePolicy {
        self.policy
    }

    /// Records one key: +1 for every set bit, -1 for every clear bit (sign bit ignored).
    pub fn update(&self, key: u64) {
        let mut peak: u32 = 0;
        for (pos, counter) in self.counts.iter().enumerate() {
            let now = if (key >> pos) & 1 == 1 {
                let old = counter.fetch_add(1, Ordering::Relaxed);
                if old == i32::MAX {
                    self.report_overflow(pos, old);
                }
                old.wrapping_add(1)
            } else {
                let old = counter.fetch_sub(1, Ordering::Relaxed);
                if old == i32::MIN {
                    self.report_overflow(pos, old);
                }
                old.wrapping_sub(1)
            };
            peak = peak.max(now.unsigned_abs());
        }
        self.observed.fetch_add(1, Ordering::Relaxed);

        if let RescalePolicy::Halve { threshold } = self.policy {
            if peak >= threshold {
                self.maybe_rescale(threshold);
            }
        }
    }

    /// Orders bit positions by ascending absolute balance.
    ///
    /// Ties keep the lower position first, so unchanged counters always produce the same
    /// ordering and an all-zero table produces the identity permutation. This walks and
    /// sorts the whole table: call it when a new hasher is built, never per key.
    pub fn compute_ordering(&self) -> BitOrder {
        // unsigned_abs gives i32::MIN its true magnitude (2^31), sorting it as most biased.
        let magnitudes = self.counts().map(i32::unsigned_abs);
        let mut order: BitOrder = std::array::from_fn(|pos| pos as BitPosition);
        sort::stable_by_key(&mut order, |&pos| magnitudes[pos as usize]);

        self.publish_metrics();
        metrics::add_orderings(1);
        debug!(
            component = "stats",
            event = "ordering_computed",
            observed = self.observed(),
            most_balanced = order[0],
            most_biased = order[TRACKED_BITS - 1],
            "bit ordering computed"
        );
        order
    }

    /// Snapshots the tracker bound to this instance.
    pub fn new_hasher(self: &Arc<Self>) -> AdaptiveHasher {
        AdaptiveHasher::new(Arc::clone(self))
    }

    /// Publishes keys observed since the last publish as an update counter delta.
    /// Kept off the per-key path: called on ordering computation and by the diagnostics.
    pub fn publish_metrics(&self) -> u64 {
        let observed = self.observed();
        let previous = self.published.swap(observed, Ordering::Relaxed);
        // A reset in between moves `observed` below the last published value.
        let delta = observed.saturating_sub(previous);
        if delta > 0 {
            metrics::add_updates(delta);
        }
        delta
    }

    /// Returns a momentary snapshot of all balance counters.
    pub fn counts(&self) -> [i32; TRACKED_BITS] {
        std::array::from_fn(|pos| self.counts[pos].load(Ordering::Relaxed))
    }

    /// Returns the balance of a single position, or `None` if it is not tracked.
    pub fn count(&self, pos: BitPosition) -> Option<i32> {
        self.counts
            .get(pos as usize)
            .map(|counter| counter.load(Ordering::Relaxed))
    }

    /// Returns how many keys have been recorded since creation or the last reset.
    pub fn observed(&self) -> u64 {
        self.observed.load(Ordering::Relaxed)
    }

    /// Zeroes all counters and the observed total.
    pub fn reset(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::Relaxed);
        }
        self.observed.store(0, Ordering::Relaxed);
        self.published.store(0, Ordering::Relaxed);
        self.overflowed.store(false, Ordering::Relaxed);
        debug!(component = "stats", event = "reset", "bit statistics reset");
    }

    /// Halves every counter toward zero, keeping their relative magnitudes.
    pub fn rescale(&self) {
        for counter in &self.counts {
            // The closure never returns None, so the update cannot fail.
            let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some(c / 2));
        }
        metrics::add_rescales(1);
        info!(
            component = "stats",
            event = "rescaled",
            observed = self.observed(),
            "bit statistics halved"
        );
    }

    /// Triggers halving in a best-effort manner once a counter reaches the threshold.
    fn maybe_rescale(&self, threshold: u32) {
        if self
            .rescale_active
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return;
        }
        // Double-check under the guard: another thread may have halved already.
        let still_over = self
            .counts
            .iter()
            .any(|counter| counter.load(Ordering::Relaxed).unsigned_abs() >= threshold);
        if still_over {
            self.rescale();
        }
        self.rescale_active.store(false, Ordering::Release);
    }

    fn report_overflow(&self, pos: usize, old: i32) {
        metrics::add_overflows(1);
        if !self.overflowed.swap(true, Ordering::Relaxed) {
            warn!(
                component = "stats",
                event = "counter_overflow",
                position = pos,
                previous = old,
                policy = ?self.policy,
                "balance counter wrapped; ordering quality degraded until reset or rescale"
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn set_count(&self, pos: BitPosition, value: i32) {
        self.counts[pos as usize].store(value, Ordering::Relaxed);
    }
}

impl Default for BitStats {
    fn default() -> Self {
        Self::new()
    }
}
