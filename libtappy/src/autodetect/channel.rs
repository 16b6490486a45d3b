// libtappy/src/autodetect/channel.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::autodetect::Engine;
use crate::types::DeviceInfo;

/// Shared by all probes of one scan. Results are forwarded only while the
/// scan is still the latest one.
#[derive(Debug)]
pub struct ScanChannel {
    generation: u64,
    total: usize,
    checked: AtomicUsize,
    engine: Arc<Engine>,
}

impl ScanChannel {
    pub(crate) fn new(generation: u64, total: usize, engine: Arc<Engine>) -> Self {
        Self {
            generation,
            total,
            checked: AtomicUsize::new(0),
            engine,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn checked(&self) -> usize {
        self.checked.load(Ordering::SeqCst)
    }

    /// Forward a detection unless the scan was cancelled or superseded.
    pub fn report_detected(&self, device: &DeviceInfo) {
        self.engine.notify_detected(self.generation, device);
    }

    /// Record that one probe finished. The last one ends the scan, provided
    /// no newer scan has started.
    pub fn check_completed(&self) {
        let checked = self.checked.fetch_add(1, Ordering::SeqCst) + 1;
        if checked == self.total && self.engine.is_current(self.generation) {
            self.engine.cancel();
        }
    }

    /// True when probes of this scan should not bother any more.
    pub fn abort_desired(&self) -> bool {
        self.engine.is_cancelled() || !self.engine.is_current(self.generation)
    }
}
