// Metric name constants
pub const UPDATES: &str = "adaptive_hash_updates";
pub const ORDERINGS: &str = "adaptive_hash_orderings";
pub const HASHERS: &str = "adaptive_hash_hashers";
pub const RESCALES: &str = "adaptive_hash_rescales";
pub const OVERFLOWS: &str = "adaptive_hash_overflows";
pub const COLLISIONS: &str = "adaptive_hash_collisions";
pub const DISTINCT_SLOTS: &str = "adaptive_hash_distinct_slots";

/// Adds observed keys.
pub fn add_updates(value: u64) {
    ::metrics::counter!(UPDATES).increment(value);
}

/// Adds computed orderings.
pub fn add_orderings(value: u64) {
    ::metrics::counter!(ORDERINGS).increment(value);
}

/// Adds constructed hashers.
pub fn add_hashers(value: u64) {
    ::metrics::counter!(HASHERS).increment(value);
}

/// Adds counter table rescales.
pub fn add_rescales(value: u64) {
    ::metrics::counter!(RESCALES).increment(value);
}

/// Adds wrapped counters.
pub fn add_overflows(value: u64) {
    ::metrics::counter!(OVERFLOWS).increment(value);
}

/// Sets collision stats of the last diagnostic pass, labelled by scenario.
pub fn set_pass_stats(scenario: &'static str, distinct: usize, collisions: usize) {
    ::metrics::gauge!(DISTINCT_SLOTS, "scenario" => scenario).set(distinct as f64);
    ::metrics::gauge!(COLLISIONS, "scenario" => scenario).set(collisions as f64);
}
