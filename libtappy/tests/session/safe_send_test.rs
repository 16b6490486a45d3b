#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use common::{PATH, fixtures};
use libtappy::constants::ACK_FRAME;
use libtappy::protocol::codes;
use libtappy::{Frame, HandlerSet, MockTransport, SessionBuilder, ms};

fn stop_frame() -> Vec<u8> {
    Frame::compose(codes::STOP, &[], 2, 2).unwrap()
}

#[tokio::test(start_paused = true)]
async fn silent_reader_still_gets_the_command() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&[PATH]));
    let session = SessionBuilder::new()
        .with_transport(mock.clone())
        .path(PATH)
        .safe_send_wait(ms(50))
        .build()?;
    session.connect().await?;

    let command = Frame::compose(codes::READ_TAG_UID, &[5, 1], 2, 2)?;
    session.safe_send_raw(command.clone(), None).await?;
    assert_eq!(mock.sent_to(PATH), vec![stop_frame()]);

    tokio::time::sleep(ms(30)).await;
    assert_eq!(mock.sent_to(PATH).len(), 1);

    tokio::time::sleep(ms(25)).await;
    assert_eq!(mock.sent_to(PATH), vec![stop_frame(), command]);
    assert_eq!(mock.flushes(), vec![PATH.to_string()]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn late_reply_to_an_old_command_is_discarded() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&[PATH]));
    let session = libtappy::test_support::connected_session(&mock, PATH).await?;

    let frames = Arc::new(Mutex::new(Vec::new()));
    let f = frames.clone();
    let handlers = HandlerSet::new().on_valid_frame(move |frame| {
        f.lock().unwrap().push(frame.payload().to_vec())
    });

    let command = Frame::compose(codes::READ_TAG_UID, &[5, 1], 2, 2)?;
    session.safe_send_raw(command, Some(handlers)).await?;

    // the reader finishes an older read, then answers STOP
    let stale = fixtures::padded(&fixtures::tag_read_payload());
    assert!(mock.push_inbound(PATH, &stale));
    assert!(mock.push_inbound(PATH, &ACK_FRAME));
    tokio::time::sleep(ms(1)).await;
    assert_eq!(mock.sent_to(PATH).len(), 2);
    assert!(frames.lock().unwrap().is_empty());

    // the reply to the new command arrives after the flush
    let fresh = fixtures::padded(&[0x01, 0x04, 1, 2, 3, 4]);
    assert!(mock.push_inbound(PATH, &fresh));
    tokio::time::sleep(ms(1)).await;
    assert_eq!(*frames.lock().unwrap(), vec![vec![0x01, 0x04, 1, 2, 3, 4]]);
    Ok(())
}
