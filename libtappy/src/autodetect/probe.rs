// libtappy/src/autodetect/probe.rs

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::sync::oneshot;
use tokio::time::{Instant, sleep_until, timeout_at};

use crate::autodetect::channel::ScanChannel;
use crate::constants::RAW_RESET_INS;
use crate::session::{HandlerSet, Session};
use crate::types::DeviceInfo;
use crate::utils::sync::lock;

/// Checks one candidate endpoint for a reader by sending the raw reset
/// instruction and waiting a bounded time for its ACK.
#[derive(Debug)]
pub struct DeviceProbe {
    device: DeviceInfo,
    session: Session,
    channel: Arc<ScanChannel>,
    ack_wait: Duration,
}

impl DeviceProbe {
    pub fn new(
        device: DeviceInfo,
        session: Session,
        channel: Arc<ScanChannel>,
        ack_wait: Duration,
    ) -> Self {
        Self {
            device,
            session,
            channel,
            ack_wait,
        }
    }

    /// Run the probe to completion. Returns whether the reset was ACKed.
    ///
    /// The probe always reports completion to the channel, after the full
    /// ACK wait when the reset went out.
    pub async fn run(self) -> bool {
        let path = self.device.path.clone();

        if let Err(e) = self.session.connect().await {
            if self.session.verbose() {
                debug!("{path}: not probed: {e}");
            }
            self.finish();
            return false;
        }
        if self.channel.abort_desired() {
            self.finish();
            return false;
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        let ack_tx = Mutex::new(Some(ack_tx));
        self.session.set_handlers(HandlerSet::new().on_ack(move || {
            if let Some(tx) = lock(&ack_tx).take() {
                let _ = tx.send(());
            }
        }));

        let deadline = Instant::now() + self.ack_wait;
        if let Err(e) = self.session.send_raw(&RAW_RESET_INS).await
            && self.session.verbose()
        {
            debug!("{path}: reset not sent: {e}");
        }

        let detected = matches!(timeout_at(deadline, ack_rx).await, Ok(Ok(())));
        if detected {
            self.session.disconnect_asap();
            if self.session.verbose() {
                debug!("{path}: reader answered reset");
            }
            self.channel.report_detected(&self.device);
        }

        sleep_until(deadline).await;
        self.finish();
        detected
    }

    fn finish(&self) {
        self.session.disconnect_asap();
        self.channel.check_completed();
    }
}
