#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use common::PATH;
use libtappy::transport::mock::MockTransport;
use libtappy::transport::Transport;
use libtappy::{ConnectionState, Error, HandlerSet, SendInfo, Session, TappyConfig};

#[tokio::test]
async fn closed_connection_reports_disconnected() {
    let m = MockTransport::with_devices(&[PATH]);
    let conn = m.open(PATH).await.unwrap();
    assert!(m.close(conn.id).await);
    let info = m.write(conn.id, &[0x01]).await;
    assert!(info.is_err());
    assert_eq!(info.error.as_deref(), Some("disconnected"));
    assert!(!m.close(conn.id).await);
}

#[tokio::test]
async fn failed_write_reaches_the_transport_error_handler() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&[PATH]));
    mock.fail_writes(PATH);
    let session = Session::new(PATH, mock.clone(), TappyConfig::default());
    session.connect().await?;

    let seen: Arc<Mutex<Vec<(SendInfo, Vec<u8>)>>> = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    session.set_handlers(
        HandlerSet::new().on_transport_error(move |info, data| {
            s.lock().unwrap().push((info.clone(), data.to_vec()))
        }),
    );

    session.send_raw(&[0x01, 0x02]).await?;
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.error.as_deref(), Some("system_error"));
    assert_eq!(seen[0].1, vec![0x01, 0x02]);
    Ok(())
}

#[tokio::test]
async fn unknown_port_cannot_connect() {
    let mock = Arc::new(MockTransport::new());
    let session = Session::new("/dev/ttyNOPE", mock, TappyConfig::default());
    assert!(matches!(session.connect().await, Err(Error::DeviceNotFound(_))));
    assert_eq!(session.state(), ConnectionState::Disconnected);
}
