use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::HashError;
use crate::hasher::AdaptiveHasher;
use crate::metrics;
use crate::stats::BitStats;

/// First key of the strided sequence.
const STRIDED_START: u64 = 1 << 11;
/// Exclusive upper bound of the strided sequence.
const STRIDED_END: u64 = 1 << 20;
const STRIDED_STEP: usize = 1024;

/// Number of passes per scenario: one on the incoming snapshot, one re-snapshotted.
pub const PASSES: usize = 2;

/// Synthetic key sequence to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Keys `0..count`.
    Sequential,
    /// Keys `2^11..2^20` stepping by 1024: only bits 10..19 vary.
    Strided,
    /// `count` seeded random keys masked to the low `random_key_bits` bits.
    Random,
    /// Sequential then strided keys through one hasher into one cumulative slot set.
    Chained,
    /// Every scenario above, in order, over one shared tracker.
    All,
}

impl Scenario {
    pub const CONCRETE: [Scenario; 4] = [
        Scenario::Sequential,
        Scenario::Strided,
        Scenario::Random,
        Scenario::Chained,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Sequential => "sequential",
            Scenario::Strided => "strided",
            Scenario::Random => "random",
            Scenario::Chained => "chained",
            Scenario::All => "all",
        }
    }

    /// Expands `All` into the concrete scenarios.
    pub fn expand(self) -> Vec<Scenario> {
        match self {
            Scenario::All => Self::CONCRETE.to_vec(),
            other => vec![other],
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Resolved parameters of a diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scenario: Scenario,
    pub count: usize,
    pub seed: u64,
    pub random_key_bits: u32,
    pub bits: u32,
}

/// Outcome of hashing one key sequence through one hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub scenario: Scenario,
    pub pass: usize,
    pub keys: usize,
    pub distinct: usize,
    pub collisions: usize,
    pub capacity: u64,
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} pass {}: {} keys -> {} distinct slots of {}, {} collisions",
            self.scenario, self.pass, self.keys, self.distinct, self.capacity, self.collisions
        )
    }
}

/// Generates the key sequence for a concrete scenario. `All` yields the concatenation.
pub fn keys(scenario: Scenario, settings: &Settings) -> Vec<u64> {
    match scenario {
        Scenario::Sequential => (0..settings.count as u64).collect(),
        Scenario::Strided => (STRIDED_START..STRIDED_END).step_by(STRIDED_STEP).collect(),
        Scenario::Random => {
            let mask = match settings.random_key_bits {
                0 => 0,
                b if b >= 64 => u64::MAX,
                b => (1u64 << b) - 1,
            };
            let mut rng = StdRng::seed_from_u64(settings.seed);
            (0..settings.count).map(|_| rng.gen::<u64>() & mask).collect()
        }
        Scenario::Chained => {
            let mut chained = keys(Scenario::Sequential, settings);
            chained.extend(keys(Scenario::Strided, settings));
            chained
        }
        Scenario::All => Scenario::CONCRETE
            .iter()
            .flat_map(|&s| keys(s, settings))
            .collect(),
    }
}

/// Hashes every key through the hasher (feeding its tracker) and counts repeated slots.
pub fn measure(hasher: &AdaptiveHasher, keys: &[u64]) -> (usize, usize) {
    let mut slots = HashSet::with_capacity(keys.len());
    let mut collisions = 0;
    for &key in keys {
        if !slots.insert(hasher.hash(key)) {
            collisions += 1;
        }
    }
    (slots.len(), collisions)
}

/// Runs every scenario selected by `settings` over the given tracker.
///
/// Each scenario runs `PASSES` times. Every pass builds its hasher right before hashing,
/// so later passes select bits from statistics that include the earlier passes' keys.
pub fn run(stats: &Arc<BitStats>, settings: &Settings) -> Result<Vec<PassReport>, HashError> {
    let mut reports = Vec::new();
    for scenario in settings.scenario.expand() {
        let keys = keys(scenario, settings);
        for pass in 1..=PASSES {
            let hasher = AdaptiveHasher::with_bits(Arc::clone(stats), settings.bits)?;
            let (distinct, collisions) = measure(&hasher, &keys);

            metrics::set_pass_stats(scenario.as_str(), distinct, collisions);
            info!(
                component = "diagnostic",
                event = "pass_finished",
                scenario = %scenario,
                pass,
                keys = keys.len(),
                distinct,
                collisions,
                selected = ?hasher.selected(),
                "collision pass finished"
            );

            reports.push(PassReport {
                scenario,
                pass,
                keys: keys.len(),
                distinct,
                collisions,
                capacity: hasher.capacity(),
            });
        }
    }
    stats.publish_metrics();
    Ok(reports)
}
