// libtappy/src/protocol/frame.rs

use crate::constants::{
    ACK_SENTINEL, FRAME_HEADER_LEN, FRAME_SIZE_N_ACK, FRAME_SIZE_NO_DATA, MAX_PARAMS_LEN,
    NACK_SENTINEL, PAD_BYTE, START_MARKER,
};
use crate::protocol::checksum::{dcs, dcs_valid, lcs, lcs_valid};
use crate::{Error, Result};

/// One delimited wire frame, from the start marker through the DCS byte.
///
/// Format: `0x00 0xFF L1 L2 LCS payload... DCS`, where `payload` is the
/// command (or response) code followed by its parameters and `L1 L2` is the
/// big-endian payload length. Preamble and postamble padding is not part of
/// a `Frame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

/// Result of scanning a buffer for a frame starting at a given index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Not enough bytes to delimit a frame yet.
    Incomplete,
    /// The length header does not checksum; no boundary is known.
    LcsError,
    /// The frame is delimited but its payload does not checksum.
    DcsError { frame: Frame, last_index: usize },
    Ack { last_index: usize },
    Nack { last_index: usize },
    Complete { frame: Frame, last_index: usize },
}

impl ExtractionOutcome {
    /// Index of the last byte belonging to the outcome, when a boundary was
    /// established.
    pub fn last_index(&self) -> Option<usize> {
        match self {
            ExtractionOutcome::Incomplete | ExtractionOutcome::LcsError => None,
            ExtractionOutcome::DcsError { last_index, .. }
            | ExtractionOutcome::Ack { last_index }
            | ExtractionOutcome::Nack { last_index }
            | ExtractionOutcome::Complete { last_index, .. } => Some(*last_index),
        }
    }
}

impl Frame {
    /// Compose a full outbound frame, including `preamble_len` leading and
    /// `postamble_len` trailing padding bytes.
    pub fn compose(
        command_code: u8,
        params: &[u8],
        preamble_len: usize,
        postamble_len: usize,
    ) -> Result<Vec<u8>> {
        if params.len() > MAX_PARAMS_LEN {
            return Err(Error::CommandTooLong {
                max: MAX_PARAMS_LEN,
                actual: params.len(),
            });
        }

        // length includes the command code
        let data_len = params.len() + 1;
        let [l1, l2] = (data_len as u16).to_be_bytes();

        let mut out =
            Vec::with_capacity(preamble_len + FRAME_SIZE_NO_DATA + data_len + postamble_len);
        out.resize(preamble_len, PAD_BYTE);
        out.extend_from_slice(&START_MARKER);
        out.push(l1);
        out.push(l2);
        out.push(lcs(l1, l2));
        out.push(command_code);
        out.extend_from_slice(params);
        let sum = params
            .iter()
            .fold(command_code, |acc, &b| acc.wrapping_add(b));
        out.push(0u8.wrapping_sub(sum));
        out.resize(out.len() + postamble_len, PAD_BYTE);
        Ok(out)
    }

    /// Build a bare frame (no padding) around an arbitrary payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        match payload.split_first() {
            Some((&code, params)) => {
                let bytes = Self::compose(code, params, 0, 0)?;
                Ok(Self { bytes })
            }
            None => Ok(Self {
                bytes: vec![START_MARKER[0], START_MARKER[1], 0x00, 0x00, 0x00, dcs(&[])],
            }),
        }
    }

    /// Extract the first recognizable frame starting at `start` in `buffer`.
    /// `buffer[start..start + 2]` is expected to hold the start marker.
    pub fn extract(buffer: &[u8], start: usize) -> ExtractionOutcome {
        if buffer.len() < start + FRAME_SIZE_NO_DATA {
            return ExtractionOutcome::Incomplete;
        }

        let l1 = buffer[start + 2];
        let l2 = buffer[start + 3];
        let lcs_byte = buffer[start + 4];
        if !lcs_valid(l1, l2, lcs_byte) {
            return ExtractionOutcome::LcsError;
        }
        let length = u16::from_be_bytes([l1, l2]) as usize;

        // ACK/NACK sentinels share the length-2 header with ordinary frames
        if length == 2 && buffer.len() >= start + FRAME_SIZE_N_ACK {
            let sentinel = &buffer[start + FRAME_HEADER_LEN..start + FRAME_SIZE_N_ACK];
            if sentinel == ACK_SENTINEL {
                return ExtractionOutcome::Ack {
                    last_index: start + FRAME_SIZE_N_ACK - 1,
                };
            }
            if sentinel == NACK_SENTINEL {
                return ExtractionOutcome::Nack {
                    last_index: start + FRAME_SIZE_N_ACK - 1,
                };
            }
        }

        let end = start + FRAME_SIZE_NO_DATA + length;
        if end > buffer.len() {
            return ExtractionOutcome::Incomplete;
        }

        let frame = Frame {
            bytes: buffer[start..end].to_vec(),
        };
        let last_index = end - 1;
        // A zero-length payload leaves only the trailing byte, which must be 0x00.
        if dcs_valid(frame.payload(), buffer[last_index]) {
            ExtractionOutcome::Complete { frame, last_index }
        } else {
            ExtractionOutcome::DcsError { frame, last_index }
        }
    }

    /// Full frame bytes, start marker through DCS.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Payload (command/response code and parameters) without header and DCS.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[FRAME_HEADER_LEN..self.bytes.len() - 1]
    }

    /// First payload byte, if any.
    pub fn command_code(&self) -> Option<u8> {
        self.payload().first().copied()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
