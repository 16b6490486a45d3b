// libtappy/src/transport/serial.rs

//! Real serial transport over `tokio-serial`.
//!
//! Each open port is owned by one worker task. The task forwards received
//! bytes to the connection's inbound channel and serves write, flush and
//! close requests sent over a control channel.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::select;
use tokio::sync::{mpsc, oneshot};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialPortType, SerialStream};

use crate::transport::traits::{Connection, SendInfo, Transport};
use crate::types::{ConnectionId, DeviceInfo};
use crate::utils::sync::lock;
use crate::{Error, Result};

/// Bit rate the reader's USB serial bridge runs at.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

const READ_CHUNK: usize = 1024;

enum PortRequest {
    Write(Vec<u8>, oneshot::Sender<SendInfo>),
    Flush(oneshot::Sender<bool>),
    Close,
}

enum WorkerEvent {
    Read(std::io::Result<usize>),
    Request(Option<PortRequest>),
}

#[derive(Debug)]
pub struct SerialTransport {
    baud_rate: u32,
    next_id: AtomicU32,
    ports: Mutex<HashMap<ConnectionId, mpsc::UnboundedSender<PortRequest>>>,
}

impl std::fmt::Debug for PortRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortRequest::Write(data, _) => write!(f, "Write({} bytes)", data.len()),
            PortRequest::Flush(_) => f.write_str("Flush"),
            PortRequest::Close => f.write_str("Close"),
        }
    }
}

impl Default for SerialTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialTransport {
    pub fn new() -> Self {
        Self::with_baud_rate(DEFAULT_BAUD_RATE)
    }

    pub fn with_baud_rate(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            next_id: AtomicU32::new(1),
            ports: Mutex::new(HashMap::new()),
        }
    }

    fn sender(&self, id: ConnectionId) -> Option<mpsc::UnboundedSender<PortRequest>> {
        lock(&self.ports).get(&id).cloned()
    }
}

async fn port_worker(
    path: String,
    mut port: SerialStream,
    mut requests: mpsc::UnboundedReceiver<PortRequest>,
    inbound: mpsc::UnboundedSender<Vec<u8>>,
) {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let event = select! {
            read = port.read(&mut buf) => WorkerEvent::Read(read),
            req = requests.recv() => WorkerEvent::Request(req),
        };

        match event {
            WorkerEvent::Read(Ok(0)) => {
                warn!("{path}: port closed by the device");
                break;
            }
            WorkerEvent::Read(Ok(n)) => {
                if inbound.send(buf[..n].to_vec()).is_err() {
                    // nobody is listening any more
                    break;
                }
            }
            WorkerEvent::Read(Err(e)) => {
                warn!("{path}: read failed: {e}");
                break;
            }
            WorkerEvent::Request(Some(PortRequest::Write(data, reply))) => {
                let info = match port.write_all(&data).await {
                    Ok(()) => SendInfo::ok(data.len()),
                    Err(e) => SendInfo::failed(0, &e.to_string()),
                };
                let _ = reply.send(info);
            }
            WorkerEvent::Request(Some(PortRequest::Flush(reply))) => {
                let ok = match port.clear(ClearBuffer::All) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("{path}: flush failed: {e}");
                        false
                    }
                };
                let _ = reply.send(ok);
            }
            WorkerEvent::Request(Some(PortRequest::Close) | None) => break,
        }
    }
    debug!("{path}: worker finished");
}

#[async_trait]
impl Transport for SerialTransport {
    async fn open(&self, path: &str) -> Result<Connection> {
        let port = tokio_serial::new(path, self.baud_rate)
            .open_native_async()
            .map_err(|e| Error::Transport(format!("{path}: {e}")))?;

        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        lock(&self.ports).insert(id, req_tx);
        tokio::spawn(port_worker(path.to_string(), port, req_rx, in_tx));

        Ok(Connection { id, inbound: in_rx })
    }

    async fn close(&self, id: ConnectionId) -> bool {
        let Some(tx) = lock(&self.ports).remove(&id) else {
            return false;
        };
        tx.send(PortRequest::Close).is_ok()
    }

    async fn write(&self, id: ConnectionId, data: &[u8]) -> SendInfo {
        let Some(tx) = self.sender(id) else {
            return SendInfo::failed(0, "disconnected");
        };
        let (reply_tx, reply_rx) = oneshot::channel();
        if tx.send(PortRequest::Write(data.to_vec(), reply_tx)).is_err() {
            return SendInfo::failed(0, "disconnected");
        }
        reply_rx
            .await
            .unwrap_or_else(|_| SendInfo::failed(0, "device_lost"))
    }

    async fn flush(&self, id: ConnectionId) -> bool {
        let Some(tx) = self.sender(id) else {
            return false;
        };
        let (reply_tx, reply_rx) = oneshot::channel();
        if tx.send(PortRequest::Flush(reply_tx)).is_err() {
            return false;
        }
        reply_rx.await.unwrap_or(false)
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceInfo>> {
        let ports = tokio_serial::available_ports().map_err(|e| Error::Transport(e.to_string()))?;
        Ok(ports
            .into_iter()
            .map(|p| {
                let mut info = DeviceInfo::new(p.port_name);
                if let SerialPortType::UsbPort(usb) = p.port_type {
                    info.vendor_id = Some(usb.vid);
                    info.product_id = Some(usb.pid);
                    info.display_name = usb.product;
                }
                info
            })
            .collect())
    }
}
