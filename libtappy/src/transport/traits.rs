// libtappy/src/transport/traits.rs

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::Result;
use crate::types::{ConnectionId, DeviceInfo};

/// Outcome of a single write, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendInfo {
    pub bytes_sent: usize,
    /// Transport-specific reason, present when the write failed.
    pub error: Option<String>,
}

impl SendInfo {
    pub fn ok(bytes_sent: usize) -> Self {
        Self {
            bytes_sent,
            error: None,
        }
    }

    pub fn failed(bytes_sent: usize, reason: &str) -> Self {
        Self {
            bytes_sent,
            error: Some(reason.to_string()),
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// An open serial endpoint. Chunks received from the device are delivered
/// on `inbound` in receipt order; the channel closes when the connection
/// does.
#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub inbound: mpsc::UnboundedReceiver<Vec<u8>>,
}

/// Transport trait abstracts serial I/O away from the protocol engine.
///
/// Implementations are shared between sessions and background tasks, so
/// every method takes `&self`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the endpoint at `path`.
    async fn open(&self, path: &str) -> Result<Connection>;

    /// Close a connection. Returns false if it was not open.
    async fn close(&self, id: ConnectionId) -> bool;

    /// Write raw bytes. Failures are reported in the returned `SendInfo`.
    async fn write(&self, id: ConnectionId, data: &[u8]) -> SendInfo;

    /// Discard any data pending in either direction.
    async fn flush(&self, id: ConnectionId) -> bool;

    /// List endpoints that might have a reader attached.
    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>>;
}
