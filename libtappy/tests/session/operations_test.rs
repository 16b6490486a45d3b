#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use common::{PATH, fixtures};
use libtappy::protocol::{TagData, TagRead, codes};
use libtappy::test_support;
use libtappy::{Callbacks, CommandError, ContentType, ErrorType, ms};

type Outcome<T> = Arc<Mutex<Vec<Result<T, CommandError>>>>;

fn recording<T: Send + 'static>() -> (Outcome<T>, Callbacks<T>) {
    let out: Outcome<T> = Arc::new(Mutex::new(Vec::new()));
    let (ok, err) = (out.clone(), out.clone());
    let cbs = Callbacks::new(move |v| ok.lock().unwrap().push(Ok(v)))
        .on_error(move |e| err.lock().unwrap().push(Err(e)));
    (out, cbs)
}

#[tokio::test(start_paused = true)]
async fn read_ndef_returns_tag_and_message() -> anyhow::Result<()> {
    let ndef = [0xD1, 0x01, 0x05, 0x55, 0x01, b'a', b'b', b'c', b'd'];
    let (mock, session) =
        test_support::reader_replying(PATH, fixtures::padded(&fixtures::ndef_payload(&ndef))).await?;
    let (out, cbs) = recording::<TagData>();

    session.read_ndef(10, cbs).await?;
    tokio::time::sleep(ms(1)).await;

    let out = out.lock().unwrap();
    assert_eq!(out.len(), 1);
    let tag = out[0].as_ref().unwrap();
    assert_eq!(tag.uid.as_bytes(), &fixtures::sample_uid_bytes());
    assert_eq!(tag.data, ndef.to_vec());

    let sent = mock.sent_to(PATH);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1][2..8], [0x00, 0xFF, 0x00, 0x02, 0xFE, codes::READ_NDEF]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn oversized_content_gets_a_detail() -> anyhow::Result<()> {
    let reply = fixtures::app_error_frame(codes::ADD_CONTENT, 0x03, 0x00);
    let (_mock, session) = test_support::reader_replying(PATH, reply).await?;
    let (out, cbs) = recording::<()>();

    session
        .add_content(1, ContentType::Text, 0, &[b'x'; 16], cbs)
        .await?;
    tokio::time::sleep(ms(1)).await;

    let out = out.lock().unwrap();
    match &out[..] {
        [Err(CommandError::Application { error_code, detail, .. })] => {
            assert_eq!(*error_code, 0x03);
            assert_eq!(*detail, Some("NDEF message too big (exceeds 8096 bytes)."));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn nack_is_reported_as_error() -> anyhow::Result<()> {
    let (_mock, session) =
        test_support::reader_replying(PATH, libtappy::constants::NACK_FRAME.to_vec()).await?;
    let (out, cbs) = recording::<TagRead>();

    session.read_tag_uid(5, false, cbs).await?;
    tokio::time::sleep(ms(1)).await;

    let types: Vec<ErrorType> = out
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.as_ref().unwrap_err().error_type())
        .collect();
    assert_eq!(types, vec![ErrorType::Nack]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn operations_require_a_connection() {
    let mock = test_support::reader_mock(PATH, Vec::new()).unwrap();
    let session = libtappy::SessionBuilder::new()
        .with_transport(mock.clone())
        .path(PATH)
        .build()
        .unwrap();
    let (_, cbs) = recording::<()>();
    assert!(matches!(
        session.send_stop(cbs).await,
        Err(libtappy::Error::NotConnected)
    ));
    assert!(mock.sent().is_empty());
}
