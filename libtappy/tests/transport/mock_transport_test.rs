#[path = "../common/mod.rs"]
mod common;

use common::PATH;
use libtappy::transport::Transport;
use libtappy::transport::mock::MockTransport;
use libtappy::SendInfo;

#[tokio::test]
async fn mock_transport_send_and_receive() {
    let m = MockTransport::with_devices(&[PATH]);
    m.respond_with(PATH, |data| Some(data.iter().rev().copied().collect()));

    let mut conn = m.open(PATH).await.unwrap();
    assert_eq!(m.write(conn.id, &[0xAA, 0xBB]).await, SendInfo::ok(2));
    assert_eq!(conn.inbound.recv().await, Some(vec![0xBB, 0xAA]));

    assert!(m.flush(conn.id).await);
    assert!(m.close(conn.id).await);
    assert_eq!(m.flushes(), vec![PATH.to_string()]);
    assert_eq!(m.closed(), vec![PATH.to_string()]);
    assert!(!m.is_open(PATH));
}

#[tokio::test]
async fn enumerate_lists_added_devices() {
    let m = MockTransport::new();
    m.add_device("/dev/ttyUSB3");
    let devices = m.enumerate_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].path, "/dev/ttyUSB3");
}
