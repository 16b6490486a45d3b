#![cfg(feature = "serial")]

//! Helpers for tests that talk to a real reader over a serial port.
//!
//! Set `TAPPY_PORT` to skip autodetection. When no reader can be found the
//! helpers return `Ok(None)` so the tests pass on machines without one.

use std::sync::{Arc, Mutex};

use libtappy::transport::Transport;
use libtappy::{Autodetector, Result, SerialTransport, Session, TappyConfig, ms};

pub fn serial() -> Arc<dyn Transport> {
    Arc::new(SerialTransport::new())
}

/// Find a reader, either from `TAPPY_PORT` or by scanning.
pub async fn find_reader(transport: Arc<dyn Transport>) -> Result<Option<String>> {
    if let Ok(port) = std::env::var("TAPPY_PORT") {
        return Ok(Some(port));
    }

    let detector = Autodetector::new(transport);
    let found = Arc::new(Mutex::new(None));
    let f = found.clone();
    detector.set_detected_callback(move |dev| {
        f.lock().unwrap().get_or_insert_with(|| dev.path.clone());
    });
    detector.start_scan().await?;
    while detector.is_scanning() {
        tokio::time::sleep(ms(20)).await;
    }
    let path = found.lock().unwrap().take();
    Ok(path)
}

/// Connected session on the first reader found.
pub async fn open_reader() -> Result<Option<Session>> {
    let transport = serial();
    let Some(path) = find_reader(transport.clone()).await? else {
        return Ok(None);
    };
    let session = Session::new(path, transport, TappyConfig::default());
    session.connect().await?;
    Ok(Some(session))
}
