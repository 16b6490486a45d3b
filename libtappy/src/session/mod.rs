// libtappy/src/session/mod.rs

//! Connection lifecycle, inbound dispatch and command sending for one
//! reader.

pub mod builder;
pub mod classifier;
pub mod config;
pub mod handle;
pub mod handlers;
pub mod operations;
mod safe_send;

pub use builder::SessionBuilder;
pub use classifier::{classify_frame, standard_handlers};
pub use config::TappyConfig;
pub use handle::{ConnectionState, Session};
pub use handlers::HandlerSet;
pub use operations::Callbacks;
