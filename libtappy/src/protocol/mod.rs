// libtappy/src/protocol/mod.rs

pub mod checksum;
pub mod commands;
pub mod error_codes;
pub mod frame;
pub mod parser;
pub mod responses;
pub mod scanner;

pub use checksum::{dcs, lcs};
pub use commands::{Command, ContentType, Vcard, codes};
pub use error_codes::detail_for_error_code;
pub use frame::{ExtractionOutcome, Frame};
pub use responses::{ContentWritten, CustomNdefWritten, TagData, TagRead, Type4BScan};
pub use scanner::{LcsErrorStrategy, ScanEvent, StreamScanner};
