#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libtappy::protocol::responses::{
    decode_content_written, decode_tag_read, decode_tag_with_data, decode_type_4b_scan,
};
use libtappy::{CommandError, ErrorType};

#[test]
fn tag_read_from_fixture() {
    let tag = decode_tag_read(&fixtures::tag_read_payload()).unwrap();
    assert_eq!(tag.tag_type.name(), "NTAG 213");
    assert_eq!(tag.uid.as_bytes(), &fixtures::sample_uid_bytes());
    assert_eq!(tag.uid.to_hex(), "04518a223b4c80");
}

#[test]
fn ndef_follows_the_uid() {
    let ndef = [0xD1, 0x01, 0x01, 0x54, 0x02];
    let tag = decode_tag_with_data(&fixtures::ndef_payload(&ndef)).unwrap();
    assert_eq!(tag.data, ndef.to_vec());
}

#[test]
fn bad_uid_length_is_a_bad_response() {
    let err = decode_tag_read(&[0x02, 0x05, 1, 2, 3, 4, 5]).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::BadResponse);
    match err {
        CommandError::BadResponse { response, detail } => {
            assert_eq!(response, vec![0x02, 0x05, 1, 2, 3, 4, 5]);
            assert_eq!(detail, "Tag code is an invalid length");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn content_written_reports_lock() {
    let w = decode_content_written(&[0x12, 0x01, 0x04, 9, 8, 7, 6]).unwrap();
    assert!(w.locked);
    assert_eq!(w.uid.as_bytes(), &[9, 8, 7, 6]);
}

#[test]
fn type_4b_lengths_are_respected() {
    let scan = decode_type_4b_scan(&[2, 1, 0xA1, 0xA2, 0xB1]).unwrap();
    assert_eq!(scan.atqb, vec![0xA1, 0xA2]);
    assert_eq!(scan.attrib, vec![0xB1]);
    assert!(decode_type_4b_scan(&[2, 1, 0xA1]).is_err());
}
