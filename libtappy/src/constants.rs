// libtappy/src/constants.rs
//! Common protocol constants used across the crate

/// Two-byte start-of-frame marker that precedes the length header.
pub const START_MARKER: [u8; 2] = [0x00, 0xFF];

/// Filler byte used for preamble and postamble padding.
pub const PAD_BYTE: u8 = 0x00;

/// Default number of padding bytes written before each outbound frame.
pub const DEFAULT_PREAMBLE_LEN: usize = 2;

/// Default number of padding bytes written after each outbound frame.
pub const DEFAULT_POSTAMBLE_LEN: usize = 2;

/// Start marker (2) + L1 + L2 + LCS + DCS
pub const FRAME_SIZE_NO_DATA: usize = 6;

/// Total size of an ACK/NACK sentinel frame.
pub const FRAME_SIZE_N_ACK: usize = 8;

/// Number of leading bytes in a frame before the payload (marker, L1, L2, LCS).
pub const FRAME_HEADER_LEN: usize = 5;

/// Largest payload (command code + params) an outbound frame may carry. The
/// length field is two bytes wide; 0xFFFF is kept reserved.
pub const MAX_PAYLOAD_LEN: usize = 65534;

/// Maximum parameter length accepted by `compose`.
pub const MAX_PARAMS_LEN: usize = MAX_PAYLOAD_LEN - 1;

/// Sentinel bytes following the header of an ACK frame.
pub const ACK_SENTINEL: [u8; 3] = [0x00, 0xFF, 0x01];

/// Sentinel bytes following the header of a NACK frame.
pub const NACK_SENTINEL: [u8; 3] = [0xFF, 0xFF, 0x02];

/// Complete ACK frame as sent by the reader.
pub const ACK_FRAME: [u8; 8] = [0x00, 0xFF, 0x00, 0x02, 0xFE, 0x00, 0xFF, 0x01];

/// Complete NACK frame as sent by the reader.
pub const NACK_FRAME: [u8; 8] = [0x00, 0xFF, 0x00, 0x02, 0xFE, 0xFF, 0xFF, 0x02];

/// First payload byte of a standard application error response.
pub const APPLICATION_ERROR_CODE: u8 = 0x7F;

/// Raw reset instruction used to probe for a reader during autodetection.
pub const RAW_RESET_INS: [u8; 7] = [0x00, 0xFF, 0x00, 0x01, 0xFF, 0x00, 0x00];

/// Valid tag UID lengths reported by the reader.
pub const TAG_UID_LENGTHS: [usize; 3] = [4, 7, 10];
