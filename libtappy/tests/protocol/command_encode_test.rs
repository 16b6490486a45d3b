#[path = "../common/mod.rs"]
mod common;

use libtappy::protocol::{Command, ContentType, Vcard, codes};

#[test]
fn read_tag_uid_encodes_enumerate_flag_inverted() {
    let single = Command::ReadTagUid {
        timeout_secs: 5,
        enumerate: false,
    };
    assert_eq!(single.encode(), vec![codes::READ_TAG_UID, 5, 0x01]);

    let all = Command::ReadTagUid {
        timeout_secs: 0,
        enumerate: true,
    };
    assert_eq!(all.encode(), vec![codes::READ_TAG_UID, 0, 0x00]);
}

#[test]
fn add_text_content_layout() {
    let cmd = Command::AddContent {
        slot: 3,
        content_type: ContentType::Text,
        uri_code: 0,
        data: b"hi".to_vec(),
    };
    assert_eq!(cmd.encode(), vec![codes::ADD_CONTENT, 3, 0x02, 0x00, b'h', b'i']);
}

#[test]
fn emulate_content_timeout_is_big_endian() {
    let cmd = Command::EmulateContent {
        slot: 1,
        interrupt: true,
        num_scans: 2,
        timeout_secs: 0x0102,
    };
    assert_eq!(cmd.command_code(), codes::EMULATE_CONTENT);
    assert_eq!(&cmd.params()[3..], &[0x01, 0x02]);
}

#[test]
fn vcard_payload_starts_with_marker() {
    let card = Vcard {
        name: "Ada".into(),
        personal_email: "ada@example.com".into(),
        ..Default::default()
    };
    let encoded = card.encode().unwrap();
    assert_eq!(encoded[0], 0x80);
    assert_eq!(&encoded[1..12], &[3, 0, 0, 0, 15, 0, 0, 0, 0, 0, 0]);
    assert_eq!(&encoded[12..], b"Ada,,,,ada@example.com,,,,,,");
}

#[test]
fn vcard_with_oversized_field_is_an_error() {
    let card = Vcard {
        home_address: "a".repeat(300),
        ..Default::default()
    };
    let err = card.encode().unwrap_err();
    assert_eq!(
        err.to_string(),
        "vCard field home_address is 300 bytes, at most 255 fit"
    );
}

#[test]
fn stop_and_reset_have_no_params() {
    assert_eq!(Command::Stop.encode(), vec![codes::STOP]);
    assert_eq!(Command::Reset.encode(), vec![codes::RESET]);
    assert_eq!(codes::command_name(codes::SCAN_TYPE_4B), Some("SCAN_TYPE_4B"));
}
