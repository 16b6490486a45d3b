// libtappy/src/autodetect/mod.rs

//! Reader discovery.
//!
//! A scan enumerates the candidate endpoints, opens each one and sends the
//! raw reset instruction. Endpoints that ACK within the wait window are
//! reported as readers. Starting a new scan supersedes any scan in flight.

pub mod channel;
pub mod probe;

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};

pub use channel::ScanChannel;
pub use probe::DeviceProbe;

use crate::Result;
use crate::session::{Session, TappyConfig};
use crate::transport::Transport;
use crate::types::DeviceInfo;
use crate::utils::default_ack_wait;
use crate::utils::sync::lock;

pub type DetectedCallback = Arc<dyn Fn(&DeviceInfo) + Send + Sync>;
pub type StatusCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Scan settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutodetectConfig {
    /// How long each endpoint gets to ACK the reset.
    pub ack_wait_timeout: Duration,
    /// Settings for the probe sessions.
    pub session: TappyConfig,
}

impl Default for AutodetectConfig {
    fn default() -> Self {
        Self {
            ack_wait_timeout: default_ack_wait(),
            session: TappyConfig::default(),
        }
    }
}

struct EngineState {
    latest_scan_id: u64,
    cancelled: bool,
    on_detected: Option<DetectedCallback>,
    on_status: Option<StatusCallback>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            latest_scan_id: 0,
            cancelled: true,
            on_detected: None,
            on_status: None,
        }
    }
}

/// Scan bookkeeping shared between the detector and its probes.
#[derive(Default)]
pub(crate) struct Engine {
    state: Mutex<EngineState>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = lock(&self.state);
        f.debug_struct("Engine")
            .field("latest_scan_id", &st.latest_scan_id)
            .field("cancelled", &st.cancelled)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Start a new generation and announce that scanning is on.
    pub(crate) fn begin_scan(&self) -> u64 {
        let (id, status) = {
            let mut st = lock(&self.state);
            st.latest_scan_id += 1;
            st.cancelled = false;
            (st.latest_scan_id, st.on_status.clone())
        };
        if let Some(cb) = status {
            cb(true);
        }
        id
    }

    /// Mark the current scan finished and announce that scanning is off.
    /// The status callback fires on every call.
    pub(crate) fn cancel(&self) {
        let status = {
            let mut st = lock(&self.state);
            st.cancelled = true;
            st.on_status.clone()
        };
        if let Some(cb) = status {
            cb(false);
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        lock(&self.state).cancelled
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        lock(&self.state).latest_scan_id == generation
    }

    pub(crate) fn latest_scan_id(&self) -> u64 {
        lock(&self.state).latest_scan_id
    }

    pub(crate) fn notify_detected(&self, generation: u64, device: &DeviceInfo) {
        let cb = {
            let st = lock(&self.state);
            if st.cancelled || st.latest_scan_id != generation {
                return;
            }
            st.on_detected.clone()
        };
        if let Some(cb) = cb {
            cb(device);
        }
    }

    pub(crate) fn set_detected(&self, cb: Option<DetectedCallback>) {
        lock(&self.state).on_detected = cb;
    }

    pub(crate) fn set_status(&self, cb: Option<StatusCallback>) {
        lock(&self.state).on_status = cb;
    }
}

/// Finds readers among the endpoints a transport can enumerate.
///
/// ```no_run
/// # async fn demo(transport: std::sync::Arc<dyn libtappy::transport::Transport>) -> libtappy::Result<()> {
/// use libtappy::autodetect::Autodetector;
///
/// let detector = Autodetector::new(transport);
/// detector.set_detected_callback(|dev| println!("reader at {}", dev.path));
/// detector.start_scan().await?;
/// # Ok(())
/// # }
/// ```
pub struct Autodetector {
    transport: Arc<dyn Transport>,
    config: AutodetectConfig,
    engine: Arc<Engine>,
}

impl fmt::Debug for Autodetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autodetector")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl Autodetector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, AutodetectConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: AutodetectConfig) -> Self {
        Self {
            transport,
            config,
            engine: Arc::new(Engine::default()),
        }
    }

    pub fn config(&self) -> &AutodetectConfig {
        &self.config
    }

    pub fn set_detected_callback<F>(&self, f: F)
    where
        F: Fn(&DeviceInfo) + Send + Sync + 'static,
    {
        self.engine.set_detected(Some(Arc::new(f)));
    }

    pub fn clear_detected_callback(&self) {
        self.engine.set_detected(None);
    }

    /// `true` is reported when a scan starts, `false` whenever one ends or is
    /// cancelled.
    pub fn set_status_callback<F>(&self, f: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.engine.set_status(Some(Arc::new(f)));
    }

    pub fn clear_status_callback(&self) {
        self.engine.set_status(None);
    }

    /// Begin a scan and return its id once every probe has been spawned.
    ///
    /// Detections arrive on the detected callback as probes finish. The scan
    /// ends by itself after every endpoint has been checked.
    pub async fn start_scan(&self) -> Result<u64> {
        let generation = self.engine.begin_scan();
        let verbose = self.config.session.verbose_logging;

        let devices = match self.transport.enumerate_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                warn!("scan {generation}: enumeration failed: {e}");
                self.engine.cancel();
                return Err(e);
            }
        };
        if verbose {
            debug!("scan {generation}: {} candidate(s)", devices.len());
        }
        if devices.is_empty() {
            self.engine.cancel();
            return Ok(generation);
        }

        let channel = Arc::new(ScanChannel::new(
            generation,
            devices.len(),
            self.engine.clone(),
        ));
        for device in devices {
            if channel.abort_desired() {
                break;
            }
            let session = Session::new(
                device.path.clone(),
                self.transport.clone(),
                self.config.session.clone(),
            );
            let probe = DeviceProbe::new(
                device,
                session,
                channel.clone(),
                self.config.ack_wait_timeout,
            );
            tokio::spawn(probe.run());
        }
        Ok(generation)
    }

    /// Stop reporting detections for the scan in flight. Probes already
    /// running wind down on their own.
    pub fn cancel_scan(&self) {
        self.engine.cancel();
    }

    pub fn is_scanning(&self) -> bool {
        !self.engine.is_cancelled()
    }

    pub fn is_cancelled(&self) -> bool {
        self.engine.is_cancelled()
    }

    pub fn latest_scan_id(&self) -> u64 {
        self.engine.latest_scan_id()
    }
}
