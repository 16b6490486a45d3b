// libtappy/src/transport/mock.rs

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::constants::{ACK_FRAME, RAW_RESET_INS};
use crate::transport::traits::{Connection, SendInfo, Transport};
use crate::types::{ConnectionId, DeviceInfo};
use crate::utils::sync::lock;
use crate::{Error, Result};

/// Computes the device's reply to one write. `None` means stay silent.
pub type Responder = Arc<dyn Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync>;

struct OpenPort {
    path: String,
    inbound: mpsc::UnboundedSender<Vec<u8>>,
}

#[derive(Default)]
struct MockState {
    devices: Vec<DeviceInfo>,
    next_id: u32,
    open: HashMap<ConnectionId, OpenPort>,
    failing_opens: HashSet<String>,
    failing_writes: HashSet<String>,
    enumerate_error: Option<String>,
    responders: HashMap<String, Responder>,
    on_flush: HashMap<String, Vec<Vec<u8>>>,
    sent: Vec<(String, Vec<u8>)>,
    flushes: Vec<String>,
    closed: Vec<String>,
}

/// In-memory transport for tests and demos. It records every write, flush
/// and close per device path, and replies through per-path responders or
/// bytes injected with [`MockTransport::push_inbound`].
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = lock(&self.state);
        f.debug_struct("MockTransport")
            .field("devices", &st.devices)
            .field("open", &st.open.len())
            .field("sent", &st.sent.len())
            .finish()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devices(paths: &[&str]) -> Self {
        let mock = Self::new();
        for path in paths {
            mock.add_device(path);
        }
        mock
    }

    pub fn add_device(&self, path: &str) {
        lock(&self.state).devices.push(DeviceInfo::new(path));
    }

    /// Make `open(path)` fail.
    pub fn fail_open(&self, path: &str) {
        lock(&self.state).failing_opens.insert(path.to_string());
    }

    /// Make every write to `path` report a transport error.
    pub fn fail_writes(&self, path: &str) {
        lock(&self.state).failing_writes.insert(path.to_string());
    }

    pub fn fail_enumeration(&self, reason: &str) {
        lock(&self.state).enumerate_error = Some(reason.to_string());
    }

    /// Install the reply function for writes to `path`, replacing any
    /// previous one.
    pub fn respond_with<F>(&self, path: &str, responder: F)
    where
        F: Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        lock(&self.state)
            .responders
            .insert(path.to_string(), Arc::new(responder));
    }

    /// Behave like a reader on `path`: answer the reset probe with ACK.
    pub fn ack_resets(&self, path: &str) {
        self.respond_with(path, |data| {
            (data == RAW_RESET_INS).then(|| ACK_FRAME.to_vec())
        });
    }

    /// Deliver `data` on the next flush of `path`, standing in for bytes the
    /// port had already read when the flush was asked for.
    pub fn inject_on_flush(&self, path: &str, data: &[u8]) {
        lock(&self.state)
            .on_flush
            .entry(path.to_string())
            .or_default()
            .push(data.to_vec());
    }

    /// Deliver `data` as if the device at `path` had sent it. Returns false
    /// when `path` is not open.
    pub fn push_inbound(&self, path: &str, data: &[u8]) -> bool {
        let st = lock(&self.state);
        st.open
            .values()
            .find(|port| port.path == path)
            .is_some_and(|port| port.inbound.send(data.to_vec()).is_ok())
    }

    /// Every successful write, in order, with its device path.
    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        lock(&self.state).sent.clone()
    }

    pub fn sent_to(&self, path: &str) -> Vec<Vec<u8>> {
        lock(&self.state)
            .sent
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, data)| data.clone())
            .collect()
    }

    pub fn flushes(&self) -> Vec<String> {
        lock(&self.state).flushes.clone()
    }

    pub fn closed(&self) -> Vec<String> {
        lock(&self.state).closed.clone()
    }

    pub fn open_connections(&self) -> usize {
        lock(&self.state).open.len()
    }

    pub fn is_open(&self, path: &str) -> bool {
        lock(&self.state).open.values().any(|port| port.path == path)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn open(&self, path: &str) -> Result<Connection> {
        let mut st = lock(&self.state);
        if st.failing_opens.contains(path) {
            return Err(Error::Transport(format!("failed to open {path}")));
        }
        if !st.devices.iter().any(|d| d.path == path) {
            return Err(Error::DeviceNotFound(path.to_string()));
        }

        st.next_id += 1;
        let id = ConnectionId(st.next_id);
        let (tx, rx) = mpsc::unbounded_channel();
        st.open.insert(
            id,
            OpenPort {
                path: path.to_string(),
                inbound: tx,
            },
        );
        Ok(Connection { id, inbound: rx })
    }

    async fn close(&self, id: ConnectionId) -> bool {
        let mut st = lock(&self.state);
        match st.open.remove(&id) {
            Some(port) => {
                st.closed.push(port.path);
                true
            }
            None => false,
        }
    }

    async fn write(&self, id: ConnectionId, data: &[u8]) -> SendInfo {
        let (responder, inbound) = {
            let mut st = lock(&self.state);
            let Some((path, inbound)) = st
                .open
                .get(&id)
                .map(|port| (port.path.clone(), port.inbound.clone()))
            else {
                return SendInfo::failed(0, "disconnected");
            };
            if st.failing_writes.contains(&path) {
                return SendInfo::failed(0, "system_error");
            }
            st.sent.push((path.clone(), data.to_vec()));
            (st.responders.get(&path).cloned(), inbound)
        };

        // run the responder unlocked so it may call back into the mock
        if let Some(reply) = responder.and_then(|r| r(data)) {
            let _ = inbound.send(reply);
        }
        SendInfo::ok(data.len())
    }

    async fn flush(&self, id: ConnectionId) -> bool {
        let mut st = lock(&self.state);
        let Some((path, inbound)) = st
            .open
            .get(&id)
            .map(|port| (port.path.clone(), port.inbound.clone()))
        else {
            return false;
        };
        for chunk in st.on_flush.remove(&path).unwrap_or_default() {
            let _ = inbound.send(chunk);
        }
        st.flushes.push(path);
        true
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>> {
        let st = lock(&self.state);
        match &st.enumerate_error {
            Some(reason) => Err(Error::Transport(reason.clone())),
            None => Ok(st.devices.clone()),
        }
    }
}
