//! Utilities for libtappy: small, reusable helpers used across the crate.
//!
//! This module contains tiny, well-tested helpers for debug printing (hex),
//! timeout defaults and lock handling.

pub mod hex;
pub(crate) mod sync;
pub mod timeout;

// Re-export the most common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
pub use timeout::*;
