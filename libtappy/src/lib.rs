// libtappy/src/lib.rs

//! libtappy
//!
//! Async host-side driver for Tappy NFC readers: frame codec, stream
//! scanning, per-reader sessions with safe-send, and reader autodetection.
#![warn(missing_docs)]

pub mod autodetect;
pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
