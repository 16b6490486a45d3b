// libtappy/src/session/operations.rs

//! High-level reader commands. Each one safe-sends its command and reports
//! the decoded outcome through a [`Callbacks`] set.

use std::fmt;
use std::sync::Arc;

use crate::error::CommandError;
use crate::protocol::commands::{Command, ContentType, Vcard, codes};
use crate::protocol::parser::DecodeResult;
use crate::protocol::responses::{
    ContentWritten, CustomNdefWritten, TagData, TagRead, Type4BScan, decode_content_written,
    decode_custom_ndef_written, decode_tag_read, decode_tag_with_data, decode_type_4b_scan,
};
use crate::session::classifier::standard_handlers;
use crate::session::handle::Session;
use crate::session::handlers::HandlerSet;
use crate::Result;

/// Error code the reader reports when added content does not fit.
const CONTENT_TOO_BIG: u8 = 0x03;
const CONTENT_TOO_BIG_DETAIL: &str = "NDEF message too big (exceeds 8096 bytes).";

type SuccessFn<T> = Arc<dyn Fn(T) + Send + Sync>;
type ErrorFn = Arc<dyn Fn(CommandError) + Send + Sync>;
type AckFn = Arc<dyn Fn() + Send + Sync>;

/// Outcome reactions for one high-level command.
pub struct Callbacks<T> {
    success: SuccessFn<T>,
    error: ErrorFn,
    ack: AckFn,
}

impl<T> Clone for Callbacks<T> {
    fn clone(&self) -> Self {
        Self {
            success: self.success.clone(),
            error: self.error.clone(),
            ack: self.ack.clone(),
        }
    }
}

impl<T> fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callbacks { .. }")
    }
}

impl<T: 'static> Callbacks<T> {
    pub fn new(on_success: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            success: Arc::new(on_success),
            error: Arc::new(|_| {}),
            ack: Arc::new(|| {}),
        }
    }

    pub fn on_error(mut self, f: impl Fn(CommandError) + Send + Sync + 'static) -> Self {
        self.error = Arc::new(f);
        self
    }

    pub fn on_ack(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.ack = Arc::new(f);
        self
    }

    /// Handlers that decode a success payload with `decode`. A payload that
    /// fails to decode is reported as an error.
    fn decoding(self, decode: fn(&[u8]) -> DecodeResult<T>) -> HandlerSet {
        let Callbacks {
            success,
            error,
            ack,
        } = self;
        let decode_error = error.clone();
        standard_handlers(
            move |payload| match decode(payload) {
                Ok(value) => success(value),
                Err(e) => decode_error(e),
            },
            move |e| error(e),
            move || ack(),
        )
    }
}

impl Callbacks<()> {
    /// Handlers for commands that report success with a bare ACK.
    fn acknowledged(self) -> HandlerSet {
        let Callbacks {
            success,
            error,
            ack,
        } = self;
        let on_ack_success = success.clone();
        standard_handlers(
            move |_| success(()),
            move |e| error(e),
            move || {
                on_ack_success(());
                ack();
            },
        )
    }
}

impl Session {
    /// Wait for a tag and report its type and UID. With `enumerate` the
    /// reader keeps scanning instead of stopping at the first tag.
    pub async fn read_tag_uid(
        &self,
        timeout_secs: u8,
        enumerate: bool,
        callbacks: Callbacks<TagRead>,
    ) -> Result<()> {
        let command = Command::ReadTagUid {
            timeout_secs,
            enumerate,
        };
        let handlers = callbacks.decoding(decode_tag_read);
        self.safe_send(&command, Some(handlers)).await
    }

    /// Wait for an NDEF-formatted tag. The NDEF message is returned raw in
    /// `TagData::data`.
    pub async fn read_ndef(&self, timeout_secs: u8, callbacks: Callbacks<TagData>) -> Result<()> {
        let handlers = callbacks.decoding(decode_tag_with_data);
        self.safe_send(&Command::ReadNdef { timeout_secs }, Some(handlers))
            .await
    }

    /// Store content in one of the reader's content slots. Slots persist
    /// until the reader is reset.
    pub async fn add_content(
        &self,
        slot: u8,
        content_type: ContentType,
        uri_code: u8,
        data: &[u8],
        callbacks: Callbacks<()>,
    ) -> Result<()> {
        let command = Command::AddContent {
            slot,
            content_type,
            uri_code,
            data: data.to_vec(),
        };
        let error = callbacks.error.clone();
        let callbacks = callbacks.on_error(move |e| error(explain_add_content_error(e)));
        self.safe_send(&command, Some(callbacks.acknowledged()))
            .await
    }

    /// [`Session::add_content`] with UTF-8 text.
    pub async fn add_text_content(
        &self,
        slot: u8,
        content_type: ContentType,
        uri_code: u8,
        text: &str,
        callbacks: Callbacks<()>,
    ) -> Result<()> {
        self.add_content(slot, content_type, uri_code, text.as_bytes(), callbacks)
            .await
    }

    /// [`Session::add_content`] with a vCard built by the reader.
    pub async fn add_vcard_content(
        &self,
        slot: u8,
        vcard: &Vcard,
        callbacks: Callbacks<()>,
    ) -> Result<()> {
        let data = vcard.encode()?;
        self.add_content(slot, ContentType::Vcard, 0x00, &data, callbacks)
            .await
    }

    /// Emulate a tag holding a slot's content. With `interrupt` false the
    /// reader keeps emulating until `num_scans` or the timeout is reached;
    /// zero disables either limit.
    pub async fn emulate_content(
        &self,
        slot: u8,
        interrupt: bool,
        num_scans: u8,
        timeout_secs: u16,
        callbacks: Callbacks<()>,
    ) -> Result<()> {
        let command = Command::EmulateContent {
            slot,
            interrupt,
            num_scans,
            timeout_secs,
        };
        self.safe_send(&command, Some(callbacks.acknowledged()))
            .await
    }

    pub async fn write_content_to_tag(
        &self,
        slot: u8,
        lock: bool,
        callbacks: Callbacks<ContentWritten>,
    ) -> Result<()> {
        let handlers = callbacks.decoding(decode_content_written);
        self.safe_send(&Command::WriteContentToTag { slot, lock }, Some(handlers))
            .await
    }

    /// Write a single text record to the next tag.
    pub async fn write_text_ndef(
        &self,
        timeout_secs: u8,
        lock: bool,
        text: &str,
        callbacks: Callbacks<TagRead>,
    ) -> Result<()> {
        let command = Command::WriteTextNdef {
            timeout_secs,
            lock,
            text: text.to_string(),
        };
        let handlers = callbacks.decoding(decode_tag_read);
        self.safe_send(&command, Some(handlers)).await
    }

    /// Permanently lock a Type 2 tag.
    pub async fn lock_tag(&self, timeout_secs: u8, callbacks: Callbacks<TagData>) -> Result<()> {
        let handlers = callbacks.decoding(decode_tag_with_data);
        self.safe_send(&Command::LockTag { timeout_secs }, Some(handlers))
            .await
    }

    /// Write a caller-composed NDEF message to the next tag.
    pub async fn write_custom_ndef(
        &self,
        timeout_secs: u8,
        lock: bool,
        ndef: &[u8],
        callbacks: Callbacks<CustomNdefWritten>,
    ) -> Result<()> {
        let command = Command::WriteCustomNdef {
            timeout_secs,
            lock,
            ndef: ndef.to_vec(),
        };
        let handlers = callbacks.decoding(decode_custom_ndef_written);
        self.safe_send(&command, Some(handlers)).await
    }

    /// Wait for a Type 4 tag using Type B modulation.
    pub async fn scan_type_4b(
        &self,
        timeout_secs: u8,
        callbacks: Callbacks<Type4BScan>,
    ) -> Result<()> {
        let handlers = callbacks.decoding(decode_type_4b_scan);
        self.safe_send(&Command::ScanType4B { timeout_secs }, Some(handlers))
            .await
    }

    /// Tell the reader to stop whatever it is doing.
    pub async fn send_stop(&self, callbacks: Callbacks<()>) -> Result<()> {
        self.safe_send(&Command::Stop, Some(callbacks.acknowledged()))
            .await
    }
}

fn explain_add_content_error(e: CommandError) -> CommandError {
    match e {
        CommandError::Application {
            command_code: codes::ADD_CONTENT,
            error_code: CONTENT_TOO_BIG,
            device_status,
            ..
        } => CommandError::Application {
            command_code: codes::ADD_CONTENT,
            error_code: CONTENT_TOO_BIG,
            device_status,
            detail: Some(CONTENT_TOO_BIG_DETAIL),
        },
        other => other,
    }
}
