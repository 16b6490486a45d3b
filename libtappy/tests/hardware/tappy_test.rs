#![cfg(feature = "serial")]

#[path = "common.rs"]
mod common;

use std::sync::{Arc, Mutex};

use libtappy::{Callbacks, Result, ms};
use serial_test::serial;

// These tests require a real reader on a serial port. They are marked
// `#[ignore]` so CI does not attempt to run them. Run manually with:
//
// cargo test -p libtappy --test hardware --features serial -- --ignored

#[tokio::test]
#[ignore]
#[serial]
async fn reader_acknowledges_stop() -> Result<()> {
    let Some(session) = common::open_reader().await? else {
        return Ok(());
    };

    let acked = Arc::new(Mutex::new(false));
    let a = acked.clone();
    session
        .send_stop(Callbacks::new(move |()| *a.lock().unwrap() = true))
        .await?;
    tokio::time::sleep(ms(500)).await;
    assert!(*acked.lock().unwrap());
    session.disconnect_now().await
}

#[tokio::test]
#[ignore]
#[serial]
async fn scan_finishes() -> Result<()> {
    let _ = common::find_reader(common::serial()).await?;
    Ok(())
}
