#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libtappy::constants::{ACK_FRAME, RAW_RESET_INS};
use libtappy::protocol::{ExtractionOutcome, Frame, codes};
use libtappy::Error;

#[test]
fn read_tag_uid_wire_bytes() {
    let out = Frame::compose(codes::READ_TAG_UID, &[0x05], 2, 2).unwrap();
    assert_eq!(out, fixtures::from_hex(fixtures::read_tag_uid_frame_hex()));
}

#[test]
fn reset_frame_is_the_raw_reset_instruction() {
    let out = Frame::compose(codes::RESET, &[], 0, 0).unwrap();
    assert_eq!(out, RAW_RESET_INS.to_vec());
}

#[test]
fn composed_frames_extract_back() {
    let payload = fixtures::ndef_payload(&[0xD1, 0x01, 0x04, 0x54]);
    let wire = fixtures::padded(&payload);
    match Frame::extract(&wire, 2) {
        ExtractionOutcome::Complete { frame, last_index } => {
            assert_eq!(frame.payload(), &payload[..]);
            assert_eq!(last_index, wire.len() - 3);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn ack_is_recognized_and_short_buffers_wait() {
    assert_eq!(
        Frame::extract(&ACK_FRAME, 0),
        ExtractionOutcome::Ack { last_index: 7 }
    );
    assert_eq!(Frame::extract(&ACK_FRAME[..5], 0), ExtractionOutcome::Incomplete);
}

#[test]
fn oversized_params_are_rejected() {
    let params = vec![0u8; 65_534];
    assert!(matches!(
        Frame::compose(codes::WRITE_CUSTOM_NDEF, &params, 2, 2),
        Err(Error::CommandTooLong { max: 65_533, actual: 65_534 })
    ));
    assert!(Frame::compose(codes::WRITE_CUSTOM_NDEF, &params[1..], 0, 0).is_ok());
}
