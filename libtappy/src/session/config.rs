// libtappy/src/session/config.rs

use std::time::Duration;

use crate::constants::{DEFAULT_POSTAMBLE_LEN, DEFAULT_PREAMBLE_LEN};
use crate::protocol::LcsErrorStrategy;
use crate::utils::{default_late_stop_window, default_safe_send_wait};

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TappyConfig {
    /// Padding bytes written before each frame.
    pub preamble_len: usize,
    /// Padding bytes written after each frame.
    pub postamble_len: usize,
    /// Emit `debug!` traces of sends, buffer state and dispatched events.
    pub verbose_logging: bool,
    pub lcs_error_strategy: LcsErrorStrategy,
    /// Upper bound on how long safe-send waits for the reader to answer
    /// STOP.
    pub safe_send_wait: Duration,
    /// When safe-send stopped waiting, the first ACK, NACK or STOP error
    /// frame within this window is taken as the late reply to STOP and
    /// dropped.
    pub late_stop_window: Duration,
}

impl Default for TappyConfig {
    fn default() -> Self {
        Self {
            preamble_len: DEFAULT_PREAMBLE_LEN,
            postamble_len: DEFAULT_POSTAMBLE_LEN,
            verbose_logging: false,
            lcs_error_strategy: LcsErrorStrategy::default(),
            safe_send_wait: default_safe_send_wait(),
            late_stop_window: default_late_stop_window(),
        }
    }
}
