// libtappy/src/protocol/responses/content.rs

use crate::protocol::parser::{self, DecodeResult};
use crate::types::{TagType, TagUid};

/// Result of writing a content slot to a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentWritten {
    pub tag_type: TagType,
    pub uid: TagUid,
    pub locked: bool,
}

/// Result of WRITE_CUSTOM_NDEF. The reader sends the tag code without a
/// length byte, so it is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomNdefWritten {
    pub tag_type: TagType,
    pub tag_code: Vec<u8>,
}

/// Decode WRITE_TAG response.
/// Layout: tag_type(1) + locked(1) + uid_len(1) + uid(4|7|10)
pub fn decode_content_written(data: &[u8]) -> DecodeResult<ContentWritten> {
    const MIN_LEN: usize = 1 + 1 + 1 + 4;
    parser::ensure_len(data, MIN_LEN)?;

    let tag_type = TagType(parser::byte_at(data, 0)?);
    let locked = parser::byte_at(data, 1)? != 0x00;
    let uid = parser::uid_at(data, 2)?;
    Ok(ContentWritten {
        tag_type,
        uid,
        locked,
    })
}

/// Decode WRITE_CUSTOM_NDEF response.
/// Layout: tag_type(1) + tag_code(N >= 4)
pub fn decode_custom_ndef_written(data: &[u8]) -> DecodeResult<CustomNdefWritten> {
    const MIN_LEN: usize = 1 + 4;
    parser::ensure_len(data, MIN_LEN)?;

    Ok(CustomNdefWritten {
        tag_type: TagType(data[0]),
        tag_code: data[1..].to_vec(),
    })
}
