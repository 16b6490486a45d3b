#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use libtappy::constants::RAW_RESET_INS;
use libtappy::{AutodetectConfig, Autodetector, MockTransport, ms};

struct Watch {
    found: Arc<Mutex<Vec<String>>>,
    status: Arc<Mutex<Vec<bool>>>,
}

fn watch(detector: &Autodetector) -> Watch {
    let found = Arc::new(Mutex::new(Vec::new()));
    let status = Arc::new(Mutex::new(Vec::new()));
    let (f, s) = (found.clone(), status.clone());
    detector.set_detected_callback(move |dev| f.lock().unwrap().push(dev.path.clone()));
    detector.set_status_callback(move |on| s.lock().unwrap().push(on));
    Watch { found, status }
}

#[tokio::test(start_paused = true)]
async fn only_the_answering_port_is_reported() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&[
        "/dev/ttyUSB0",
        "/dev/ttyUSB1",
        "/dev/ttyS0",
    ]));
    mock.ack_resets("/dev/ttyUSB1");
    let detector = Autodetector::new(mock.clone());
    let w = watch(&detector);

    detector.start_scan().await?;
    tokio::time::sleep(ms(99)).await;
    assert!(detector.is_scanning());
    assert_eq!(*w.found.lock().unwrap(), vec!["/dev/ttyUSB1".to_string()]);

    tokio::time::sleep(ms(10)).await;
    assert!(!detector.is_scanning());
    assert_eq!(*w.status.lock().unwrap(), vec![true, false]);

    // every candidate got exactly one reset and was released
    for path in ["/dev/ttyUSB0", "/dev/ttyUSB1", "/dev/ttyS0"] {
        assert_eq!(mock.sent_to(path), vec![RAW_RESET_INS.to_vec()]);
    }
    assert_eq!(mock.open_connections(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn unopenable_ports_do_not_stall_the_scan() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&["/dev/ttyUSB0", "/dev/ttyUSB1"]));
    mock.fail_open("/dev/ttyUSB0");
    mock.fail_writes("/dev/ttyUSB1");
    let detector = Autodetector::new(mock.clone());
    let w = watch(&detector);

    detector.start_scan().await?;
    tokio::time::sleep(ms(150)).await;
    assert!(w.found.lock().unwrap().is_empty());
    assert!(!detector.is_scanning());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn custom_ack_window() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&["/dev/ttyACM0"]));
    let config = AutodetectConfig {
        ack_wait_timeout: Duration::from_millis(300),
        ..Default::default()
    };
    let detector = Autodetector::with_config(mock, config);
    detector.start_scan().await?;

    tokio::time::sleep(ms(200)).await;
    assert!(detector.is_scanning());
    tokio::time::sleep(ms(110)).await;
    assert!(!detector.is_scanning());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_scan_suppresses_detections() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&["/dev/ttyUSB0"]));
    mock.ack_resets("/dev/ttyUSB0");
    let detector = Autodetector::new(mock.clone());
    let w = watch(&detector);

    detector.start_scan().await?;
    detector.cancel_scan();
    tokio::time::sleep(ms(150)).await;

    assert!(w.found.lock().unwrap().is_empty());
    assert!(detector.is_cancelled());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn ack_after_cancel_is_not_reported() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::with_devices(&["/dev/ttyUSB0"]));
    let detector = Autodetector::new(mock.clone());
    let w = watch(&detector);

    detector.start_scan().await?;
    tokio::time::sleep(ms(1)).await;
    // the reset is out and the port is waiting for its ACK
    assert_eq!(mock.sent_to("/dev/ttyUSB0"), vec![RAW_RESET_INS.to_vec()]);

    detector.cancel_scan();
    assert!(mock.push_inbound("/dev/ttyUSB0", &libtappy::constants::ACK_FRAME));
    tokio::time::sleep(ms(150)).await;

    assert!(w.found.lock().unwrap().is_empty());
    assert!(detector.is_cancelled());
    assert_eq!(mock.open_connections(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn scan_ids_increase() -> anyhow::Result<()> {
    let mock = Arc::new(MockTransport::new());
    let detector = Autodetector::new(mock);
    assert_eq!(detector.start_scan().await?, 1);
    assert_eq!(detector.start_scan().await?, 2);
    assert_eq!(detector.latest_scan_id(), 2);
    Ok(())
}
