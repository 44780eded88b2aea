//! Small in-place sorting helpers.

pub mod insertion;


pub use insertion::stable_by_key;
