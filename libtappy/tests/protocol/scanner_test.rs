#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libtappy::constants::{ACK_FRAME, NACK_FRAME};
use libtappy::protocol::{LcsErrorStrategy, ScanEvent, StreamScanner};
use proptest::prelude::*;

#[test]
fn mixed_stream_in_order() {
    let mut s = StreamScanner::new(LcsErrorStrategy::EmptyBuffer);
    let mut wire = ACK_FRAME.to_vec();
    wire.extend(fixtures::padded(&fixtures::tag_read_payload()));
    wire.extend_from_slice(&NACK_FRAME);
    s.extend(&wire);

    let events = s.drain_events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], ScanEvent::Ack);
    assert_eq!(
        events[1],
        ScanEvent::ValidFrame(fixtures::bare(&fixtures::tag_read_payload()))
    );
    assert_eq!(events[2], ScanEvent::Nack);
}

#[test]
fn corrupt_header_under_both_strategies() {
    // LCS should be 0xFE
    let bad_then_ack = [
        0x00, 0xFF, 0x00, 0x02, 0x00, 0x00, 0xFF, 0x00, 0x02, 0xFE, 0x00, 0xFF, 0x01,
    ];

    let mut empty = StreamScanner::new(LcsErrorStrategy::EmptyBuffer);
    empty.extend(&bad_then_ack);
    assert!(matches!(empty.next_event(), Some(ScanEvent::LcsError(_))));
    assert!(empty.is_empty());

    let mut keep = StreamScanner::new(LcsErrorStrategy::RemoveOnlyBadStart);
    keep.extend(&bad_then_ack);
    assert!(matches!(keep.next_event(), Some(ScanEvent::LcsError(_))));
    assert_eq!(keep.next_event(), Some(ScanEvent::Ack));
}

#[test]
fn frame_split_across_chunks() {
    let wire = fixtures::padded(&fixtures::tag_read_payload());
    let mut s = StreamScanner::new(LcsErrorStrategy::EmptyBuffer);
    let (a, b) = wire.split_at(7);
    s.extend(a);
    assert_eq!(s.next_event(), None);
    s.extend(b);
    assert!(matches!(s.next_event(), Some(ScanEvent::ValidFrame(_))));
}

proptest! {
    #[test]
    fn arbitrary_input_always_terminates(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let mut s = StreamScanner::new(LcsErrorStrategy::RemoveOnlyBadStart);
        s.extend(&data);
        let mut last = s.len();
        while s.next_event().is_some() {
            prop_assert!(s.len() < last);
            last = s.len();
        }
    }

    #[test]
    fn any_payload_round_trips_through_the_scanner(payload in proptest::collection::vec(any::<u8>(), 1..300)) {
        // these two payloads are indistinguishable from ACK and NACK on the wire
        prop_assume!(payload != [0x00, 0xFF] && payload != [0xFF, 0xFF]);
        let mut s = StreamScanner::new(LcsErrorStrategy::EmptyBuffer);
        s.extend(&fixtures::padded(&payload));
        match s.next_event() {
            Some(ScanEvent::ValidFrame(frame)) => prop_assert_eq!(frame.payload(), &payload[..]),
            other => prop_assert!(false, "unexpected event: {:?}", other),
        }
    }
}
