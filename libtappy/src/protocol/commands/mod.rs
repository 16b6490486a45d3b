// libtappy/src/protocol/commands/mod.rs

pub mod codes;
pub mod content;
pub mod tag;

pub use codes::command_name;
pub use content::{
    ContentType, Vcard, encode_add_content, encode_emulate_content, encode_write_content_to_tag,
};
pub use tag::{
    encode_lock_tag, encode_read_ndef, encode_read_tag_uid, encode_scan_type_4b,
    encode_write_custom_ndef, encode_write_text_ndef,
};

/// High-level Command enum. New commands should be added here and
/// their parameter encoder placed in `protocol::commands::<group>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Stop,
    AddContent {
        slot: u8,
        content_type: ContentType,
        uri_code: u8,
        data: Vec<u8>,
    },
    EmulateContent {
        slot: u8,
        interrupt: bool,
        num_scans: u8,
        timeout_secs: u16,
    },
    ReadTagUid {
        timeout_secs: u8,
        enumerate: bool,
    },
    WriteContentToTag {
        slot: u8,
        lock: bool,
    },
    WriteTextNdef {
        timeout_secs: u8,
        lock: bool,
        text: String,
    },
    LockTag {
        timeout_secs: u8,
    },
    ReadNdef {
        timeout_secs: u8,
    },
    WriteCustomNdef {
        timeout_secs: u8,
        lock: bool,
        ndef: Vec<u8>,
    },
    ScanType4B {
        timeout_secs: u8,
    },
}

impl Command {
    /// Return the command code sent as the first payload byte.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::Reset => codes::RESET,
            Self::Stop => codes::STOP,
            Self::AddContent { .. } => codes::ADD_CONTENT,
            Self::EmulateContent { .. } => codes::EMULATE_CONTENT,
            Self::ReadTagUid { .. } => codes::READ_TAG_UID,
            Self::WriteContentToTag { .. } => codes::WRITE_TAG,
            Self::WriteTextNdef { .. } => codes::WRITE_TEXT_NDEF,
            Self::LockTag { .. } => codes::LOCK_TAG,
            Self::ReadNdef { .. } => codes::READ_NDEF,
            Self::WriteCustomNdef { .. } => codes::WRITE_CUSTOM_NDEF,
            Self::ScanType4B { .. } => codes::SCAN_TYPE_4B,
        }
    }

    /// Encode the parameters that follow the command code.
    pub fn params(&self) -> Vec<u8> {
        match self {
            Self::Reset | Self::Stop => Vec::new(),
            Self::AddContent {
                slot,
                content_type,
                uri_code,
                data,
            } => encode_add_content(*slot, *content_type, *uri_code, data),
            Self::EmulateContent {
                slot,
                interrupt,
                num_scans,
                timeout_secs,
            } => encode_emulate_content(*slot, *interrupt, *num_scans, *timeout_secs),
            Self::ReadTagUid {
                timeout_secs,
                enumerate,
            } => encode_read_tag_uid(*timeout_secs, *enumerate),
            Self::WriteContentToTag { slot, lock } => encode_write_content_to_tag(*slot, *lock),
            Self::WriteTextNdef {
                timeout_secs,
                lock,
                text,
            } => encode_write_text_ndef(*timeout_secs, *lock, text),
            Self::LockTag { timeout_secs } => encode_lock_tag(*timeout_secs),
            Self::ReadNdef { timeout_secs } => encode_read_ndef(*timeout_secs),
            Self::WriteCustomNdef {
                timeout_secs,
                lock,
                ndef,
            } => encode_write_custom_ndef(*timeout_secs, *lock, ndef),
            Self::ScanType4B { timeout_secs } => encode_scan_type_4b(*timeout_secs),
        }
    }

    /// Encode the command into the raw payload (command code + params).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.command_code()];
        out.extend(self.params());
        out
    }
}
