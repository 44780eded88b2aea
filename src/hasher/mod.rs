// Package hasher folds 64-bit keys into small table indices using a frozen bit selection.

pub mod adaptive;


pub use adaptive::{new_hasher, AdaptiveHasher, DEFAULT_BITS, MAX_BITS, MIN_BITS};
