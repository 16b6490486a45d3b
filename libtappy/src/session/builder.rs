// libtappy/src/session/builder.rs

use std::sync::Arc;
use std::time::Duration;

use crate::protocol::LcsErrorStrategy;
use crate::session::config::TappyConfig;
use crate::session::handle::Session;
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Session with optional configuration.
#[derive(Default)]
pub struct SessionBuilder {
    transport: Option<Arc<dyn Transport>>,
    path: Option<String>,
    config: TappyConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the transport the session talks through (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Device path handed to `Transport::open`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TappyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn preamble_len(mut self, len: usize) -> Self {
        self.config.preamble_len = len;
        self
    }

    pub fn postamble_len(mut self, len: usize) -> Self {
        self.config.postamble_len = len;
        self
    }

    pub fn verbose_logging(mut self, on: bool) -> Self {
        self.config.verbose_logging = on;
        self
    }

    pub fn lcs_error_strategy(mut self, strategy: LcsErrorStrategy) -> Self {
        self.config.lcs_error_strategy = strategy;
        self
    }

    pub fn safe_send_wait(mut self, wait: Duration) -> Self {
        self.config.safe_send_wait = wait;
        self
    }

    pub fn late_stop_window(mut self, window: Duration) -> Self {
        self.config.late_stop_window = window;
        self
    }

    /// Consume the builder and return a disconnected Session.
    /// Requires both a transport and a path.
    pub fn build(self) -> Result<Session> {
        let transport = self
            .transport
            .ok_or_else(|| Error::Transport("no transport configured".into()))?;
        let path = self
            .path
            .ok_or_else(|| Error::DeviceNotFound("no device path configured".into()))?;
        Ok(Session::new(path, transport, self.config))
    }
}
