// libtappy/src/session/safe_send.rs

//! Safe-send: quiesce the stream before sending a command.
//!
//! The reader may still be answering a command nobody waits for any more,
//! and those late bytes would otherwise be taken as the reply to the next
//! command. Safe-send first sends STOP and waits for any reaction to it
//! (or for `safe_send_wait` to pass). It then flushes the transport, drops
//! everything buffered, binds the caller's handlers and only then writes
//! the real command.
//!
//! When the wait runs out the answer to STOP may still come, ahead of the
//! answer to the real command since the reader replies in order. The first
//! such reply within `late_stop_window` is dropped instead of dispatched.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::constants::APPLICATION_ERROR_CODE;
use crate::protocol::{Command, ScanEvent, codes};
use crate::session::handle::{Session, SessionState};
use crate::session::handlers::HandlerSet;
use crate::utils::HexDump;
use crate::utils::sync::lock;
use crate::{Error, Result};

/// The command waiting for the stream to go quiet. A session holds at most
/// one; a newer safe-send replaces it.
pub(crate) struct PendingOperation {
    data: Vec<u8>,
    /// Handlers to bind once the stream is quiet.
    restore: HandlerSet,
    epoch: u64,
}

/// Whether `event` is something the reader sends in answer to STOP.
fn is_stop_reply(event: &ScanEvent) -> bool {
    match event {
        ScanEvent::Ack | ScanEvent::Nack => true,
        ScanEvent::ValidFrame(frame) => is_stop_error(frame.payload()),
        ScanEvent::LcsError(_) | ScanEvent::DcsError(_) => false,
    }
}

fn is_stop_error(payload: &[u8]) -> bool {
    payload.starts_with(&[APPLICATION_ERROR_CODE, codes::STOP])
}

impl SessionState {
    /// Consume the late-STOP guard if `event` is the reply it waits for.
    /// Returns true when the event must not be dispatched.
    pub(crate) fn take_late_stop_reply(&mut self, event: &ScanEvent) -> bool {
        let Some(until) = self.late_stop_until else {
            return false;
        };
        if Instant::now() > until {
            self.late_stop_until = None;
            return false;
        }
        if is_stop_reply(event) {
            self.late_stop_until = None;
            return true;
        }
        false
    }
}

impl Session {
    /// Send already framed bytes once the stream has been quiesced.
    ///
    /// `handlers` are bound just before `data` is written; `None` keeps the
    /// handlers that were bound when this was called.
    pub async fn safe_send_raw(&self, data: Vec<u8>, handlers: Option<HandlerSet>) -> Result<()> {
        if data.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let epoch = {
            let mut st = lock(&self.inner.state);
            if st.live_connection().is_none() {
                return Err(Error::NotConnected);
            }
            st.scanner.clear();
            // an overwritten operation still owns the handlers the caller
            // had before the transient set went in
            let previous = match st.pending.take() {
                Some(old) => old.restore,
                None => st.handlers.clone(),
            };
            st.safe_send_epoch += 1;
            let epoch = st.safe_send_epoch;
            st.pending = Some(PendingOperation {
                data,
                restore: handlers.unwrap_or(previous),
                epoch,
            });
            st.handlers = self.quiescence_handlers(epoch);
            epoch
        };

        self.spawn_quiescence_timer(epoch);
        self.send_command(codes::STOP, &[]).await
    }

    /// Frame the command, then send it through [`Session::safe_send_raw`].
    pub async fn safe_send_command(
        &self,
        command_code: u8,
        params: &[u8],
        handlers: Option<HandlerSet>,
    ) -> Result<()> {
        let framed = self.compose(command_code, params)?;
        self.safe_send_raw(framed, handlers).await
    }

    /// Safe-send a typed [`Command`].
    pub async fn safe_send(&self, command: &Command, handlers: Option<HandlerSet>) -> Result<()> {
        self.safe_send_command(command.command_code(), &command.params(), handlers)
            .await
    }

    /// Handlers bound while waiting for the reaction to STOP. Any reaction
    /// means the reader has stopped; a valid frame only counts when it is
    /// the application error answering STOP itself.
    fn quiescence_handlers(&self, epoch: u64) -> HandlerSet {
        let weak = self.downgrade();
        let trigger: Arc<dyn Fn() + Send + Sync> = Arc::new(move || {
            if let Some(session) = Session::from_weak(&weak) {
                session.on_quiescent(epoch);
            }
        });

        let (t_ack, t_nack, t_lcs, t_dcs, t_tx, t_frame) = (
            trigger.clone(),
            trigger.clone(),
            trigger.clone(),
            trigger.clone(),
            trigger.clone(),
            trigger,
        );
        HandlerSet::new()
            .on_ack(move || t_ack())
            .on_nack(move || t_nack())
            .on_lcs_error(move |_| t_lcs())
            .on_dcs_error(move |_| t_dcs())
            .on_transport_error(move |_, _| t_tx())
            .on_valid_frame(move |frame| {
                if is_stop_error(frame.payload()) {
                    t_frame()
                }
            })
    }

    fn spawn_quiescence_timer(&self, epoch: u64) {
        let weak = self.downgrade();
        let wait = self.inner.config.safe_send_wait;
        tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            let Some(session) = Session::from_weak(&weak) else {
                return;
            };
            if let Some(op) = session.claim_pending(epoch) {
                warn!(
                    "{}: no reaction to STOP within {:?}, sending anyway",
                    session.path(),
                    wait
                );
                let window = session.inner.config.late_stop_window;
                lock(&session.inner.state).late_stop_until = Some(Instant::now() + window);
                session.flush_and_send(op).await;
            }
        });
    }

    /// Take the pending operation if it still belongs to `epoch`, and unbind
    /// all handlers so nothing arriving before the flush is dispatched.
    fn claim_pending(&self, epoch: u64) -> Option<PendingOperation> {
        let mut st = lock(&self.inner.state);
        if st.pending.as_ref().is_none_or(|op| op.epoch != epoch) {
            return None;
        }
        st.handlers = HandlerSet::default();
        st.pending.take()
    }

    /// Runs on the handler path; the flush itself is async so it goes to a
    /// task. Later reactions for the same epoch find nothing to claim.
    fn on_quiescent(&self, epoch: u64) {
        if let Some(op) = self.claim_pending(epoch) {
            let session = self.clone();
            tokio::spawn(async move { session.flush_and_send(op).await });
        }
    }

    async fn flush_and_send(&self, op: PendingOperation) {
        let Some(id) = lock(&self.inner.state).live_connection() else {
            if self.verbose() {
                debug!("{}: disconnected before deferred send", self.path());
            }
            return;
        };

        if !self.inner.transport.flush(id).await {
            warn!("{}: flush failed before deferred send", self.path());
        }
        self.drain_inbound().await;

        {
            let mut st = lock(&self.inner.state);
            st.scanner.clear();
            // a newer safe-send owns the handlers now
            if st.safe_send_epoch == op.epoch {
                st.handlers = op.restore;
            }
        }

        if self.verbose() {
            debug!("{}: stream quiet, sending {}", self.path(), HexDump(&op.data));
        }
        if let Err(e) = self.send_raw(&op.data).await {
            warn!("{}: deferred send failed: {e}", self.path());
        }
    }

    /// Wait until the pump has processed every chunk the transport already
    /// handed over. No handlers are bound meanwhile, so those bytes go
    /// nowhere.
    async fn drain_inbound(&self) {
        let Some(control) = lock(&self.inner.state).pump_control.clone() else {
            return;
        };
        let (done_tx, done_rx) = oneshot::channel();
        if control.send(done_tx).is_ok() {
            let _ = done_rx.await;
        }
    }
}
