//! Visual encoding of city populations.
//!
//! All functions here are pure and total: any population (including
//! negative or NaN) maps to some tier, so callers never handle errors.

pub mod marker;

pub use marker::*;
