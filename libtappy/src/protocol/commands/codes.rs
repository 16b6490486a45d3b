// libtappy/src/protocol/commands/codes.rs

//! Command codes understood by the reader.

pub const RESET: u8 = 0x00;
pub const ADD_CONTENT: u8 = 0x02;
pub const EMULATE_CONTENT: u8 = 0x03;
pub const READ_TAG_UID: u8 = 0x07;
pub const WRITE_TAG: u8 = 0x08;
pub const WRITE_TEXT_NDEF: u8 = 0x09;
pub const LOCK_TAG: u8 = 0x13;
pub const READ_NDEF: u8 = 0x26;
pub const STOP: u8 = 0x27;
pub const WRITE_CUSTOM_NDEF: u8 = 0x29;
pub const SCAN_TYPE_4B: u8 = 0x2A;

/// `(code, name)` for every command, sorted by code.
pub static COMMAND_NAMES: [(u8, &str); 11] = [
    (RESET, "RESET"),
    (ADD_CONTENT, "ADD_CONTENT"),
    (EMULATE_CONTENT, "EMULATE_CONTENT"),
    (READ_TAG_UID, "READ_TAG_UID"),
    (WRITE_TAG, "WRITE_TAG"),
    (WRITE_TEXT_NDEF, "WRITE_TEXT_NDEF"),
    (LOCK_TAG, "LOCK_TAG"),
    (READ_NDEF, "READ_NDEF"),
    (STOP, "STOP"),
    (WRITE_CUSTOM_NDEF, "WRITE_CUSTOM_NDEF"),
    (SCAN_TYPE_4B, "SCAN_TYPE_4B"),
];

/// Name of a command code, for log output.
pub fn command_name(code: u8) -> Option<&'static str> {
    COMMAND_NAMES
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|idx| COMMAND_NAMES[idx].1)
}
