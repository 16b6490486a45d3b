//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::sync::Arc;

use crate::constants::{ACK_FRAME, DEFAULT_POSTAMBLE_LEN, DEFAULT_PREAMBLE_LEN};
use crate::protocol::{Frame, codes};
use crate::session::{Session, TappyConfig};
use crate::transport::mock::MockTransport;
use crate::Result;

/// Frame a response payload the way a reader would send it. The first byte
/// of `payload` sits in the command-code position.
#[doc(hidden)]
pub fn response_frame(payload: &[u8]) -> Result<Vec<u8>> {
    let (code, rest) = payload.split_first().ok_or(crate::Error::EmptyPayload)?;
    Frame::compose(*code, rest, DEFAULT_PREAMBLE_LEN, DEFAULT_POSTAMBLE_LEN)
}

/// A mock with one reader at `path` that ACKs STOP and answers every other
/// write with `reply`.
#[doc(hidden)]
pub fn reader_mock(path: &str, reply: Vec<u8>) -> Result<Arc<MockTransport>> {
    let mock = Arc::new(MockTransport::with_devices(&[path]));
    let stop = Frame::compose(codes::STOP, &[], DEFAULT_PREAMBLE_LEN, DEFAULT_POSTAMBLE_LEN)?;
    mock.respond_with(path, move |data| {
        if data == stop {
            Some(ACK_FRAME.to_vec())
        } else {
            Some(reply.clone())
        }
    });
    Ok(mock)
}

/// Open a default-configured session on `path`.
#[doc(hidden)]
pub async fn connected_session(mock: &Arc<MockTransport>, path: &str) -> Result<Session> {
    let session = Session::new(path, mock.clone(), TappyConfig::default());
    session.connect().await?;
    Ok(session)
}

/// [`reader_mock`] plus a connected session on it.
#[doc(hidden)]
pub async fn reader_replying(path: &str, reply: Vec<u8>) -> Result<(Arc<MockTransport>, Session)> {
    let mock = reader_mock(path, reply)?;
    let session = connected_session(&mock, path).await?;
    Ok((mock, session))
}
