// libtappy/src/protocol/scanner.rs

//! Inbound stream buffering and frame resynchronization.
//!
//! The reader delivers bytes in arbitrarily sized chunks, and a chunk may
//! contain padding, a partial frame, several frames, or leftovers of an
//! exchange nobody is waiting for any more. `StreamScanner` accumulates the
//! chunks and peels off one classified event at a time.

use crate::constants::{FRAME_HEADER_LEN, FRAME_SIZE_NO_DATA, START_MARKER};
use crate::protocol::frame::{ExtractionOutcome, Frame};

/// How much of the buffer to discard when a length checksum fails.
///
/// There is no way to tell whether the bytes after a bad header belong to a
/// real frame or whether the marker was spurious. If data arrives one byte
/// at a time both strategies behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LcsErrorStrategy {
    /// Drop everything currently buffered.
    #[default]
    EmptyBuffer,
    /// Drop only the start marker, length bytes and LCS of the bad header.
    RemoveOnlyBadStart,
}

/// One classified result peeled off the inbound buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Ack,
    Nack,
    /// Buffer contents from the bad header onwards.
    LcsError(Vec<u8>),
    DcsError(Frame),
    ValidFrame(Frame),
}

/// Accumulates inbound bytes for one connection.
#[derive(Debug, Default)]
pub struct StreamScanner {
    buffer: Vec<u8>,
    strategy: LcsErrorStrategy,
}

impl StreamScanner {
    pub fn new(strategy: LcsErrorStrategy) -> Self {
        Self {
            buffer: Vec::new(),
            strategy,
        }
    }

    pub fn strategy(&self) -> LcsErrorStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: LcsErrorStrategy) {
        self.strategy = strategy;
    }

    /// Append a received chunk without scanning it.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Bytes currently buffered.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Peel the next event off the front of the buffer.
    ///
    /// Returns `None` once the buffer holds nothing dispatchable (too short,
    /// an incomplete frame, or no start marker). Every `Some` strictly
    /// shrinks the buffer, so calling this in a loop always terminates.
    pub fn next_event(&mut self) -> Option<ScanEvent> {
        if self.buffer.len() < FRAME_SIZE_NO_DATA {
            return None;
        }

        let Some(start) = self.buffer.windows(2).position(|w| w == START_MARKER) else {
            // Nothing framed in here, most likely stray preamble. The last
            // byte may still be the first half of a marker.
            let scanned = self.buffer.len() - 1;
            self.consume(scanned);
            return None;
        };

        match Frame::extract(&self.buffer, start) {
            // a spurious marker followed by a header that never completes
            // stalls here until more bytes arrive
            ExtractionOutcome::Incomplete => None,
            ExtractionOutcome::LcsError => {
                let tail = self.buffer[start..].to_vec();
                match self.strategy {
                    LcsErrorStrategy::EmptyBuffer => self.buffer.clear(),
                    LcsErrorStrategy::RemoveOnlyBadStart => {
                        self.consume(start + FRAME_HEADER_LEN)
                    }
                }
                Some(ScanEvent::LcsError(tail))
            }
            ExtractionOutcome::Ack { last_index } => {
                self.consume(last_index + 1);
                Some(ScanEvent::Ack)
            }
            ExtractionOutcome::Nack { last_index } => {
                self.consume(last_index + 1);
                Some(ScanEvent::Nack)
            }
            ExtractionOutcome::DcsError { frame, last_index } => {
                self.consume(last_index + 1);
                Some(ScanEvent::DcsError(frame))
            }
            ExtractionOutcome::Complete { frame, last_index } => {
                self.consume(last_index + 1);
                Some(ScanEvent::ValidFrame(frame))
            }
        }
    }

    /// Drain every event currently dispatchable, in buffer order.
    pub fn drain_events(&mut self) -> Vec<ScanEvent> {
        std::iter::from_fn(|| self.next_event()).collect()
    }

    fn consume(&mut self, n: usize) {
        if n >= self.buffer.len() {
            self.buffer.clear();
        } else if n > 0 {
            self.buffer.drain(..n);
        }
    }
}
