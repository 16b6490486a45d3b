// libtappy/src/protocol/responses/type4b.rs

use crate::protocol::parser::{self, DecodeResult};

/// Type 4B tag found by SCAN_TYPE_4B.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Type4BScan {
    pub atqb: Vec<u8>,
    pub attrib: Vec<u8>,
}

/// Layout: atqb_len(1) + attrib_len(1) + atqb(N) + attrib(M)
pub fn decode_type_4b_scan(data: &[u8]) -> DecodeResult<Type4BScan> {
    parser::ensure_len(data, 2)?;

    let atqb_len = data[0] as usize;
    let attrib_len = data[1] as usize;
    parser::ensure_len(data, 2 + atqb_len + attrib_len)?;

    let atqb = parser::slice_at(data, 2, atqb_len)?.to_vec();
    let attrib = parser::slice_at(data, 2 + atqb_len, attrib_len)?.to_vec();
    Ok(Type4BScan { atqb, attrib })
}
