//! Find a reader on the serial ports and read one tag UID with it.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p libtappy --example autodetect --features serial

use std::sync::Arc;

use libtappy::protocol::TagRead;
use libtappy::transport::Transport;
use libtappy::{Autodetector, Callbacks, SerialTransport, Session, TappyConfig, ms};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let transport: Arc<dyn Transport> = Arc::new(SerialTransport::new());
    let detector = Autodetector::new(transport.clone());

    let (found_tx, mut found_rx) = mpsc::unbounded_channel();
    detector.set_detected_callback(move |dev| {
        let _ = found_tx.send(dev.clone());
    });
    detector.set_status_callback(|scanning| {
        println!("{}", if scanning { "scanning..." } else { "scan finished" });
    });
    detector.start_scan().await?;

    let device = loop {
        tokio::select! {
            Some(dev) = found_rx.recv() => break Some(dev),
            _ = tokio::time::sleep(ms(20)) => {
                if !detector.is_scanning() {
                    break found_rx.try_recv().ok();
                }
            }
        }
    };
    let Some(device) = device else {
        println!("no reader found");
        return Ok(());
    };
    println!("reader at {} ({:?})", device.path, device.display_name);

    let config = TappyConfig {
        verbose_logging: true,
        ..Default::default()
    };
    let session = Session::new(device.path.clone(), transport, config);
    session.connect().await?;

    let (tag_tx, mut tag_rx) = mpsc::unbounded_channel();
    let err_tx = tag_tx.clone();
    let callbacks = Callbacks::new(move |tag: TagRead| {
        let _ = tag_tx.send(Ok(tag));
    })
    .on_error(move |e| {
        let _ = err_tx.send(Err(e));
    });
    println!("present a tag within 10 seconds");
    session.read_tag_uid(10, false, callbacks).await?;

    match tokio::time::timeout(ms(11_000), tag_rx.recv()).await {
        Ok(Some(Ok(tag))) => println!("{} {}", tag.tag_type, tag.uid.to_hex()),
        Ok(Some(Err(e))) => println!("read failed: {e}"),
        _ => println!("no answer from reader"),
    }

    session.disconnect_now().await?;
    Ok(())
}
