//! Collision diagnostics over synthetic key sequences.
//!
//! Not part of the hashing contract; used by the `adaptive-hash` binary as a manual
//! sanity check of how well the adaptive selection spreads a key population.

pub mod scenario;


pub use scenario::{keys, measure, run, PassReport, Scenario, Settings};
