//! Cross-module scenarios for the tracker and hashers working together.
//!
//! These cover the end-to-end properties: frozen selections, collision baselines,
//! the process-wide tracker and concurrent updates.

mod cases_collision_test;
