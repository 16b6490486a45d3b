//! Timeout helpers used across the crate.
//!
//! Keep these helpers minimal: they centralize the default wait values and
//! provide a small conversion helper so tests and code can express timeouts
//! in milliseconds clearly.

use std::time::Duration;

/// How long an autodetection probe waits for the reset ACK. Serial stacks
/// on some hosts add tens of milliseconds of latency on top of the
/// reader's own response time.
pub const DEFAULT_ACK_WAIT_MS: u64 = 100;

/// How long safe-send waits for the reader to answer STOP before sending
/// the real command anyway.
pub const DEFAULT_SAFE_SEND_WAIT_MS: u64 = 25;

/// After safe-send gave up waiting, how long a late reply to STOP is still
/// recognized and kept away from the next command's handlers.
pub const DEFAULT_LATE_STOP_WINDOW_MS: u64 = 500;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

pub fn default_ack_wait() -> Duration {
    ms(DEFAULT_ACK_WAIT_MS)
}

pub fn default_safe_send_wait() -> Duration {
    ms(DEFAULT_SAFE_SEND_WAIT_MS)
}

pub fn default_late_stop_window() -> Duration {
    ms(DEFAULT_LATE_STOP_WINDOW_MS)
}
