// libtappy/src/prelude.rs

pub use crate::autodetect::{AutodetectConfig, Autodetector};
pub use crate::protocol::{Command, ContentType, Frame, ScanEvent, StreamScanner, Vcard};
pub use crate::session::{Callbacks, ConnectionState, HandlerSet, Session, SessionBuilder, TappyConfig};
pub use crate::transport::{MockTransport, SendInfo, Transport};
#[cfg(feature = "serial")]
pub use crate::transport::SerialTransport;
pub use crate::{
    CommandError, ConnectionId, DeviceInfo, Error, ErrorType, Result, TagType, TagUid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_ack_wait, ms, parse_hex};
