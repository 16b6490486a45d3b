// libtappy/src/protocol/commands/tag.rs

//! Encoders for the commands that wait for a tag to enter the field.
//! Every `timeout_secs` is capped at 255 by the wire format; 0 disables
//! the timeout.

/// READ_TAG_UID params. `enumerate` asks the reader to keep reporting tags;
/// the flag is inverted on the wire.
pub fn encode_read_tag_uid(timeout_secs: u8, enumerate: bool) -> Vec<u8> {
    vec![timeout_secs, if enumerate { 0x00 } else { 0x01 }]
}

pub fn encode_read_ndef(timeout_secs: u8) -> Vec<u8> {
    vec![timeout_secs]
}

/// WRITE_TEXT_NDEF params: `timeout, lock, utf8 text...`
pub fn encode_write_text_ndef(timeout_secs: u8, lock: bool, text: &str) -> Vec<u8> {
    encode_write_custom_ndef(timeout_secs, lock, text.as_bytes())
}

pub fn encode_lock_tag(timeout_secs: u8) -> Vec<u8> {
    vec![timeout_secs]
}

/// WRITE_CUSTOM_NDEF params: `timeout, lock, ndef message...`
pub fn encode_write_custom_ndef(timeout_secs: u8, lock: bool, ndef: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + ndef.len());
    buf.push(timeout_secs);
    buf.push(lock as u8);
    buf.extend_from_slice(ndef);
    buf
}

pub fn encode_scan_type_4b(timeout_secs: u8) -> Vec<u8> {
    vec![timeout_secs]
}
