// libtappy/src/session/classifier.rs

use std::sync::Arc;

use crate::constants::APPLICATION_ERROR_CODE;
use crate::error::CommandError;
use crate::protocol::{Frame, detail_for_error_code};
use crate::session::handlers::HandlerSet;

/// Unwrap a valid frame into its response payload, or the application
/// error it reports.
///
/// The payload is the frame without its 5-byte header and trailing DCS. A
/// payload of at least four bytes starting with `0x7F` is an application
/// error: `0x7F, command_code, error_code, device_status`.
pub fn classify_frame(frame: &Frame) -> Result<&[u8], CommandError> {
    match frame.payload() {
        [APPLICATION_ERROR_CODE, command_code, error_code, device_status, ..] => {
            Err(CommandError::Application {
                command_code: *command_code,
                error_code: *error_code,
                device_status: *device_status,
                detail: detail_for_error_code(*error_code),
            })
        }
        payload => Ok(payload),
    }
}

/// Build the handler set used for ordinary commands: every failure mode is
/// funnelled into `on_error`, valid frames are classified, and ACK goes to
/// `on_ack`.
pub fn standard_handlers<S, E, A>(on_success: S, on_error: E, on_ack: A) -> HandlerSet
where
    S: Fn(&[u8]) + Send + Sync + 'static,
    E: Fn(CommandError) + Send + Sync + 'static,
    A: Fn() + Send + Sync + 'static,
{
    let on_error = Arc::new(on_error);
    let (e_nack, e_lcs, e_dcs, e_tx, e_frame) = (
        on_error.clone(),
        on_error.clone(),
        on_error.clone(),
        on_error.clone(),
        on_error,
    );

    HandlerSet::new()
        .on_ack(on_ack)
        .on_nack(move || e_nack(CommandError::Nack))
        .on_lcs_error(move |buffer| {
            e_lcs(CommandError::Lcs {
                buffer: buffer.to_vec(),
            })
        })
        .on_dcs_error(move |frame| {
            e_dcs(CommandError::Dcs {
                frame: frame.as_bytes().to_vec(),
            })
        })
        .on_transport_error(move |info, data| {
            e_tx(CommandError::Serial {
                info: info.clone(),
                data: data.to_vec(),
            })
        })
        .on_valid_frame(move |frame| match classify_frame(frame) {
            Ok(payload) => on_success(payload),
            Err(e) => e_frame(e),
        })
}
