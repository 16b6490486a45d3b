// libtappy/src/error.rs

use thiserror::Error;

use crate::transport::SendInfo;

/// Errors returned directly to the caller. These are precondition
/// violations or transport failures on connection setup; they are never
/// delivered through a handler set.
#[derive(Error, Debug)]
pub enum Error {
    #[error("command too long: at most {max} parameter bytes, got {actual}")]
    CommandTooLong { max: usize, actual: usize },

    #[error("cannot send while not connected")]
    NotConnected,

    #[error("connection still in the process of being established")]
    StillConnecting,

    #[error("cannot send an empty payload")]
    EmptyPayload,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("vCard field {field} is {len} bytes, at most 255 fit")]
    VcardFieldTooLong { field: &'static str, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error categories, matching the codes the reader's host
/// libraries have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorType {
    Nack = 0x01,
    Lcs = 0x02,
    Dcs = 0x03,
    Application = 0x04,
    Serial = 0x05,
    BadResponse = 0x06,
}

impl ErrorType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Errors reported through the error path of a handler set built by
/// [`crate::session::standard_handlers`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("reader replied with NACK")]
    Nack,

    #[error("length checksum error on inbound frame ({} bytes buffered)", buffer.len())]
    Lcs { buffer: Vec<u8> },

    #[error("data checksum error on inbound frame ({} bytes)", frame.len())]
    Dcs { frame: Vec<u8> },

    #[error("serial port error: {}", info.error.as_deref().unwrap_or("unknown"))]
    Serial { info: SendInfo, data: Vec<u8> },

    #[error(
        "application error: command={command_code:#04x} error={error_code:#04x} status={device_status:#04x}{}",
        detail.map(|d| format!(" ({d})")).unwrap_or_default()
    )]
    Application {
        command_code: u8,
        error_code: u8,
        device_status: u8,
        detail: Option<&'static str>,
    },

    #[error("bad response: {detail}")]
    BadResponse {
        response: Vec<u8>,
        detail: String,
    },
}

impl CommandError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            CommandError::Nack => ErrorType::Nack,
            CommandError::Lcs { .. } => ErrorType::Lcs,
            CommandError::Dcs { .. } => ErrorType::Dcs,
            CommandError::Serial { .. } => ErrorType::Serial,
            CommandError::Application { .. } => ErrorType::Application,
            CommandError::BadResponse { .. } => ErrorType::BadResponse,
        }
    }

    /// Shorthand used by response decoders.
    pub fn bad_response(response: &[u8], detail: impl Into<String>) -> Self {
        CommandError::BadResponse {
            response: response.to_vec(),
            detail: detail.into(),
        }
    }
}
