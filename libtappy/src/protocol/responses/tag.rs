// libtappy/src/protocol/responses/tag.rs

use crate::protocol::parser::{self, DecodeResult};
use crate::types::{TagType, TagUid};

/// A tag seen by READ_TAG_UID or written by WRITE_TEXT_NDEF.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagRead {
    pub tag_type: TagType,
    pub uid: TagUid,
}

/// A tag plus whatever the reader returned after its UID. For READ_NDEF
/// the trailing bytes are the raw NDEF message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagData {
    pub tag_type: TagType,
    pub uid: TagUid,
    pub data: Vec<u8>,
}

/// Decode `tag_type, uid_len, uid...`
/// Layout: tag_type(1) + uid_len(1) + uid(4|7|10)
pub fn decode_tag_read(data: &[u8]) -> DecodeResult<TagRead> {
    const MIN_LEN: usize = 5;
    parser::ensure_len(data, MIN_LEN)?;

    let tag_type = TagType(parser::byte_at(data, 0)?);
    let uid = parser::uid_at(data, 1)?;
    Ok(TagRead { tag_type, uid })
}

/// Decode `tag_type, uid_len, uid..., trailing...`
pub fn decode_tag_with_data(data: &[u8]) -> DecodeResult<TagData> {
    const MIN_LEN: usize = 1 + 1 + 4;
    parser::ensure_len(data, MIN_LEN)?;

    let tag_type = TagType(parser::byte_at(data, 0)?);
    let uid = parser::uid_at(data, 1)?;
    let trailing = data[2 + uid.len()..].to_vec();
    Ok(TagData {
        tag_type,
        uid,
        data: trailing,
    })
}
