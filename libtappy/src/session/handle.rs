// libtappy/src/session/handle.rs

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::protocol::{Frame, StreamScanner};
use crate::session::config::TappyConfig;
use crate::session::handlers::HandlerSet;
use crate::session::safe_send::PendingOperation;
use crate::transport::Transport;
use crate::types::ConnectionId;
use crate::utils::HexDump;
use crate::utils::sync::lock;
use crate::{Error, Result};

/// Connection lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

pub(crate) struct SessionState {
    pub(crate) conn_state: ConnectionState,
    pub(crate) connection: Option<ConnectionId>,
    pub(crate) scanner: StreamScanner,
    pub(crate) handlers: HandlerSet,
    pub(crate) pending: Option<PendingOperation>,
    pub(crate) safe_send_epoch: u64,
    /// Set when safe-send sent a command without seeing STOP answered.
    pub(crate) late_stop_until: Option<Instant>,
    /// Asks the inbound pump to process every chunk already queued.
    pub(crate) pump_control: Option<mpsc::UnboundedSender<oneshot::Sender<()>>>,
    disconnect_requested: bool,
}

impl SessionState {
    /// Connection to write to, if the session is fully connected.
    pub(crate) fn live_connection(&self) -> Option<ConnectionId> {
        match self.conn_state {
            ConnectionState::Connected => self.connection,
            _ => None,
        }
    }
}

pub(crate) struct Inner {
    pub(crate) path: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: TappyConfig,
    pub(crate) state: Mutex<SessionState>,
}

/// A connection to one reader.
///
/// `Session` is a cheap handle: clones share the same connection, buffer
/// and handler set. Inbound bytes are pumped by a background task that is
/// started on connect, so the session must be used inside a tokio runtime.
/// Handlers run on that task and never while session state is locked, so
/// they may call back into the session.
#[derive(Clone)]
pub struct Session {
    pub(crate) inner: Arc<Inner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = lock(&self.inner.state);
        f.debug_struct("Session")
            .field("path", &self.inner.path)
            .field("state", &st.conn_state)
            .field("connection", &st.connection)
            .field("buffered", &st.scanner.len())
            .field("handlers", &st.handlers)
            .finish()
    }
}

impl Session {
    pub fn new(path: impl Into<String>, transport: Arc<dyn Transport>, config: TappyConfig) -> Self {
        let scanner = StreamScanner::new(config.lcs_error_strategy);
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                transport,
                config,
                state: Mutex::new(SessionState {
                    conn_state: ConnectionState::Disconnected,
                    connection: None,
                    scanner,
                    handlers: HandlerSet::default(),
                    pending: None,
                    safe_send_epoch: 0,
                    late_stop_until: None,
                    pump_control: None,
                    disconnect_requested: false,
                }),
            }),
        }
    }

    pub(crate) fn from_weak(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub(crate) fn downgrade(&self) -> Weak<Inner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn verbose(&self) -> bool {
        self.inner.config.verbose_logging
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    pub fn config(&self) -> &TappyConfig {
        &self.inner.config
    }

    pub fn state(&self) -> ConnectionState {
        lock(&self.inner.state).conn_state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Copy of the bytes currently waiting in the inbound buffer.
    pub fn buffered(&self) -> Vec<u8> {
        lock(&self.inner.state).scanner.buffered().to_vec()
    }

    /// The handler set currently bound.
    pub fn handlers(&self) -> HandlerSet {
        lock(&self.inner.state).handlers.clone()
    }

    /// Replace the bound handler set. Takes effect from the next dispatched
    /// event.
    pub fn set_handlers(&self, handlers: HandlerSet) {
        lock(&self.inner.state).handlers = handlers;
    }

    /// Open the transport connection and start pumping inbound bytes.
    ///
    /// Does nothing when the session is already connecting or connected.
    pub async fn connect(&self) -> Result<()> {
        {
            let mut st = lock(&self.inner.state);
            if st.conn_state != ConnectionState::Disconnected {
                return Ok(());
            }
            st.conn_state = ConnectionState::Connecting;
        }

        let conn = match self.inner.transport.open(&self.inner.path).await {
            Ok(conn) => conn,
            Err(e) => {
                let mut st = lock(&self.inner.state);
                st.conn_state = ConnectionState::Disconnected;
                st.disconnect_requested = false;
                drop(st);
                if self.verbose() {
                    debug!("{}: connect failed: {e}", self.inner.path);
                }
                return Err(e);
            }
        };

        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let deferred_disconnect = {
            let mut st = lock(&self.inner.state);
            st.conn_state = ConnectionState::Connected;
            st.connection = Some(conn.id);
            st.scanner.clear();
            st.late_stop_until = None;
            st.pump_control = Some(control_tx);
            std::mem::take(&mut st.disconnect_requested)
        };
        if self.verbose() {
            debug!("{}: connected as {}", self.inner.path, conn.id);
        }
        tokio::spawn(pump_inbound(
            self.downgrade(),
            conn.id,
            conn.inbound,
            control_rx,
        ));

        if deferred_disconnect {
            self.disconnect_now().await?;
        }
        Ok(())
    }

    /// Close the connection right away.
    ///
    /// Fails with `StillConnecting` while a connect is in flight; use
    /// [`Session::disconnect_asap`] there. Disconnecting an already
    /// disconnected session is a no-op.
    pub async fn disconnect_now(&self) -> Result<()> {
        let id = {
            let mut st = lock(&self.inner.state);
            match st.conn_state {
                ConnectionState::Connecting => return Err(Error::StillConnecting),
                ConnectionState::Disconnected => return Ok(()),
                ConnectionState::Connected => {}
            }
            self.reset_to_disconnected(&mut st)
        };
        if let Some(id) = id {
            self.close_connection(id).await;
        }
        Ok(())
    }

    /// Disconnect as soon as possible: immediately when connected, or right
    /// after the connection establishes when a connect is in flight.
    ///
    /// Callable from handlers. The transport close runs on a spawned task.
    pub fn disconnect_asap(&self) {
        let id = {
            let mut st = lock(&self.inner.state);
            match st.conn_state {
                ConnectionState::Connecting => {
                    st.disconnect_requested = true;
                    return;
                }
                ConnectionState::Disconnected => return,
                ConnectionState::Connected => self.reset_to_disconnected(&mut st),
            }
        };
        let Some(id) = id else { return };

        match tokio::runtime::Handle::try_current() {
            Ok(rt) => {
                let session = self.clone();
                rt.spawn(async move { session.close_connection(id).await });
            }
            Err(_) => warn!(
                "{}: no runtime to close {id} on, connection left open",
                self.inner.path
            ),
        }
    }

    fn reset_to_disconnected(&self, st: &mut SessionState) -> Option<ConnectionId> {
        st.conn_state = ConnectionState::Disconnected;
        st.scanner.clear();
        st.pending = None;
        st.late_stop_until = None;
        st.pump_control = None;
        st.connection.take()
    }

    async fn close_connection(&self, id: ConnectionId) {
        if self.inner.transport.close(id).await {
            if self.verbose() {
                debug!("{}: closed {id}", self.inner.path);
            }
        } else {
            warn!("{}: failed to close {id}", self.inner.path);
        }
    }

    /// Write raw bytes without framing them. Does not wait for a response.
    ///
    /// A write the transport reports as failed goes to the transport error
    /// handler; it is not returned as an `Err`.
    pub async fn send_raw(&self, data: &[u8]) -> Result<()> {
        let id = lock(&self.inner.state)
            .live_connection()
            .ok_or(Error::NotConnected)?;
        if data.is_empty() {
            return Err(Error::EmptyPayload);
        }

        if self.verbose() {
            debug!("{}: sending {}", self.inner.path, HexDump(data));
        }
        let info = self.inner.transport.write(id, data).await;
        if info.is_err() {
            warn!(
                "{}: write failed after {} bytes: {}",
                self.inner.path,
                info.bytes_sent,
                info.error.as_deref().unwrap_or("unknown")
            );
            let handlers = self.handlers();
            handlers.notify_transport_error(&info, data);
        }
        Ok(())
    }

    /// Frame `command_code` and `params` with the configured padding and
    /// send it.
    pub async fn send_command(&self, command_code: u8, params: &[u8]) -> Result<()> {
        let framed = self.compose(command_code, params)?;
        self.send_raw(&framed).await
    }

    pub(crate) fn compose(&self, command_code: u8, params: &[u8]) -> Result<Vec<u8>> {
        let c = &self.inner.config;
        Frame::compose(command_code, params, c.preamble_len, c.postamble_len)
    }

    /// Append a received chunk to the inbound buffer and dispatch every
    /// event it completes to the bound handler set.
    ///
    /// The transport pump calls this; it is public so bytes can be fed in
    /// directly.
    pub fn receive(&self, chunk: &[u8]) {
        let verbose = self.verbose();
        {
            let mut st = lock(&self.inner.state);
            st.scanner.extend(chunk);
            if verbose {
                debug!(
                    "{}: received {}, buffer now {}",
                    self.inner.path,
                    HexDump(chunk),
                    HexDump(st.scanner.buffered())
                );
            }
        }

        loop {
            // handler set is read per event so a handler can swap it for
            // the next one
            let (event, handlers, late_stop) = {
                let mut st = lock(&self.inner.state);
                match st.scanner.next_event() {
                    Some(event) => {
                        let late_stop = st.take_late_stop_reply(&event);
                        (event, st.handlers.clone(), late_stop)
                    }
                    None => break,
                }
            };
            if late_stop {
                if verbose {
                    debug!("{}: dropping late reply to STOP {:?}", self.inner.path, event);
                }
                continue;
            }
            if verbose {
                debug!("{}: dispatching {:?}", self.inner.path, event);
            }
            handlers.dispatch(&event);
        }
    }

    fn receive_on(&self, id: ConnectionId, chunk: &[u8]) {
        let current = lock(&self.inner.state).live_connection();
        if current == Some(id) {
            self.receive(chunk);
        } else if self.verbose() {
            debug!(
                "{}: dropping {} bytes for stale {id}",
                self.inner.path,
                chunk.len()
            );
        }
    }
}

/// Forward inbound chunks until the connection closes or every session
/// handle is gone.
///
/// A request on `control` makes the pump process every chunk already queued
/// before it answers, so the requester knows nothing read so far is still in
/// flight.
async fn pump_inbound(
    session: Weak<Inner>,
    id: ConnectionId,
    mut inbound: mpsc::UnboundedReceiver<Vec<u8>>,
    mut control: mpsc::UnboundedReceiver<oneshot::Sender<()>>,
) {
    loop {
        tokio::select! {
            biased;
            request = control.recv() => {
                let Some(done) = request else { break };
                let Some(session) = Session::from_weak(&session) else { break };
                while let Ok(chunk) = inbound.try_recv() {
                    session.receive_on(id, &chunk);
                }
                let _ = done.send(());
            }
            chunk = inbound.recv() => {
                let Some(chunk) = chunk else { break };
                let Some(session) = Session::from_weak(&session) else { break };
                session.receive_on(id, &chunk);
            }
        }
    }
}
