// libtappy/src/protocol/responses/mod.rs

//! Decoders for the unwrapped success payloads (header and DCS already
//! stripped by the response classifier).

pub mod content;
pub mod tag;
pub mod type4b;

pub use content::{ContentWritten, CustomNdefWritten, decode_content_written, decode_custom_ndef_written};
pub use tag::{TagData, TagRead, decode_tag_read, decode_tag_with_data};
pub use type4b::{Type4BScan, decode_type_4b_scan};
