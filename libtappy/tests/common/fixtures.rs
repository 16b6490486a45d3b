// fixtures.rs:  commonly used test payloads/frames

use libtappy::protocol::Frame;

/// READ_TAG_UID with a 5 s timeout, padded 2 + 2.
pub fn read_tag_uid_frame_hex() -> &'static str {
    "000000ff0002fe0705f40000"
}

pub fn sample_uid_bytes() -> [u8; 7] {
    [0x04, 0x51, 0x8A, 0x22, 0x3B, 0x4C, 0x80]
}

/// READ_TAG_UID response payload for an NTAG 213 carrying `sample_uid_bytes`.
pub fn tag_read_payload() -> Vec<u8> {
    let mut payload = vec![18u8, 7];
    payload.extend_from_slice(&sample_uid_bytes());
    payload
}

/// READ_NDEF response payload: tag header followed by raw NDEF bytes.
pub fn ndef_payload(ndef: &[u8]) -> Vec<u8> {
    let mut payload = tag_read_payload();
    payload.extend_from_slice(ndef);
    payload
}

/// Reader-side frame with 2 bytes of preamble and postamble.
pub fn padded(payload: &[u8]) -> Vec<u8> {
    libtappy::test_support::response_frame(payload).unwrap()
}

pub fn bare(payload: &[u8]) -> Frame {
    Frame::from_payload(payload).unwrap()
}

pub fn app_error_frame(command_code: u8, error_code: u8, status: u8) -> Vec<u8> {
    padded(&[0x7F, command_code, error_code, status])
}

pub fn from_hex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}
