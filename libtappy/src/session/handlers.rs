// libtappy/src/session/handlers.rs

use std::fmt;
use std::sync::Arc;

use crate::protocol::{Frame, ScanEvent};
use crate::transport::SendInfo;

pub type SignalHandler = Arc<dyn Fn() + Send + Sync>;
pub type BufferHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;
pub type FrameHandler = Arc<dyn Fn(&Frame) + Send + Sync>;
pub type TransportErrorHandler = Arc<dyn Fn(&SendInfo, &[u8]) + Send + Sync>;

/// Reactions to inbound events for one session. A missing reaction means
/// the event is dropped.
///
/// Cloning is cheap; the session hands a clone to each dispatch so that the
/// set can be replaced from inside a handler.
#[derive(Clone, Default)]
pub struct HandlerSet {
    pub ack: Option<SignalHandler>,
    pub nack: Option<SignalHandler>,
    /// Receives the buffer contents from the bad header onwards.
    pub lcs_error: Option<BufferHandler>,
    pub dcs_error: Option<FrameHandler>,
    /// Receives the failed write's info and the bytes that were written.
    pub transport_error: Option<TransportErrorHandler>,
    pub valid_frame: Option<FrameHandler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_ack(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.ack = Some(Arc::new(f));
        self
    }

    pub fn on_nack(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.nack = Some(Arc::new(f));
        self
    }

    pub fn on_lcs_error(mut self, f: impl Fn(&[u8]) + Send + Sync + 'static) -> Self {
        self.lcs_error = Some(Arc::new(f));
        self
    }

    pub fn on_dcs_error(mut self, f: impl Fn(&Frame) + Send + Sync + 'static) -> Self {
        self.dcs_error = Some(Arc::new(f));
        self
    }

    pub fn on_transport_error(
        mut self,
        f: impl Fn(&SendInfo, &[u8]) + Send + Sync + 'static,
    ) -> Self {
        self.transport_error = Some(Arc::new(f));
        self
    }

    pub fn on_valid_frame(mut self, f: impl Fn(&Frame) + Send + Sync + 'static) -> Self {
        self.valid_frame = Some(Arc::new(f));
        self
    }

    /// Route one scanner event to its reaction.
    pub fn dispatch(&self, event: &ScanEvent) {
        match event {
            ScanEvent::Ack => {
                if let Some(h) = &self.ack {
                    h()
                }
            }
            ScanEvent::Nack => {
                if let Some(h) = &self.nack {
                    h()
                }
            }
            ScanEvent::LcsError(buffer) => {
                if let Some(h) = &self.lcs_error {
                    h(buffer)
                }
            }
            ScanEvent::DcsError(frame) => {
                if let Some(h) = &self.dcs_error {
                    h(frame)
                }
            }
            ScanEvent::ValidFrame(frame) => {
                if let Some(h) = &self.valid_frame {
                    h(frame)
                }
            }
        }
    }

    pub fn notify_transport_error(&self, info: &SendInfo, data: &[u8]) {
        if let Some(h) = &self.transport_error {
            h(info, data)
        }
    }

    /// True when no reaction is installed.
    pub fn is_empty(&self) -> bool {
        self.ack.is_none()
            && self.nack.is_none()
            && self.lcs_error.is_none()
            && self.dcs_error.is_none()
            && self.transport_error.is_none()
            && self.valid_frame.is_none()
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSet")
            .field("ack", &self.ack.is_some())
            .field("nack", &self.nack.is_some())
            .field("lcs_error", &self.lcs_error.is_some())
            .field("dcs_error", &self.dcs_error.is_some())
            .field("transport_error", &self.transport_error.is_some())
            .field("valid_frame", &self.valid_frame.is_some())
            .finish()
    }
}
