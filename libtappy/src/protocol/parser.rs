// libtappy/src/protocol/parser.rs

//! Bounds-checked readers shared by the response decoders. Every failure is
//! a `CommandError::BadResponse` carrying the whole response.

use crate::error::CommandError;
use crate::types::TagUid;

pub type DecodeResult<T> = std::result::Result<T, CommandError>;

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> DecodeResult<()> {
    if data.len() < min {
        return Err(CommandError::bad_response(
            data,
            format!("response too short: expected at least {min} bytes, got {}", data.len()),
        ));
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> DecodeResult<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> DecodeResult<&[u8]> {
    let end = idx.checked_add(len).ok_or_else(|| {
        CommandError::bad_response(data, "length field overflows")
    })?;
    if data.len() < end {
        return Err(CommandError::bad_response(
            data,
            "Frame too short to contain tag code",
        ));
    }
    Ok(&data[idx..end])
}

/// Parse a length-prefixed tag UID whose length byte sits at `len_idx`.
/// The length is validated before the bounds so that a bogus length is
/// reported as such.
pub fn uid_at(data: &[u8], len_idx: usize) -> DecodeResult<TagUid> {
    let uid_len = byte_at(data, len_idx)? as usize;
    if !crate::constants::TAG_UID_LENGTHS.contains(&uid_len) {
        return Err(CommandError::bad_response(
            data,
            "Tag code is an invalid length",
        ));
    }
    let uid = slice_at(data, len_idx + 1, uid_len)?;
    TagUid::try_from(uid).map_err(|_| CommandError::bad_response(data, "Tag code is an invalid length"))
}
