//! Recording transport for host-side testing
//!
//! [`RecordingTransport`] implements [`Transport`] without any hardware. It
//! reassembles the byte stream into the 16-bit words the chip would have
//! latched, and checks the framing contract on the way: bytes only inside a
//! frame, exactly two bytes per frame, no nested frames.
//!
//! It only needs `heapless`, so it is available on every target.

use crate::transport::Transport;

/// Capacity of the write log (a full bring-up uses 14 words).
pub const LOG_CAPACITY: usize = 256;

/// Errors reported by [`RecordingTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Injected failure (see [`RecordingTransport::fail_after`]).
    Injected,
    /// A byte was transferred outside a frame.
    NotFramed,
    /// `begin_frame` while a frame was already open.
    NestedFrame,
    /// `end_frame` with other than two bytes in the frame.
    BadFrameLength(usize),
    /// A transfer happened before `configure`.
    NotConfigured,
    /// The write log is full.
    LogFull,
}

/// Mock transport: records every latched 16-bit word.
///
/// The log holds at most [`LOG_CAPACITY`] words; the next `end_frame` fails
/// with [`MockError::LogFull`]. Call [`RecordingTransport::clear`] between
/// phases of a long session.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    words: heapless::Vec<u16, LOG_CAPACITY>,
    pending: heapless::Vec<u8, 2>,
    in_frame: bool,
    frames_opened: usize,
    frames_closed: usize,
    configure_calls: usize,
    bytes_transferred: usize,
    fail_after: Option<usize>,
}

impl RecordingTransport {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`-th byte transfer from now (0-based) and every later one fail.
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(self.bytes_transferred.saturating_add(n));
    }

    /// Stop injecting failures.
    pub fn clear_failure(&mut self) {
        self.fail_after = None;
    }

    /// Every complete word, in write order.
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Most recent complete word.
    pub fn last_word(&self) -> Option<u16> {
        self.words.last().copied()
    }

    /// Forget recorded words and counters (the configured flag survives).
    pub fn clear(&mut self) {
        self.words.clear();
        self.pending.clear();
        self.in_frame = false;
        self.frames_opened = 0;
        self.frames_closed = 0;
        self.bytes_transferred = 0;
        self.fail_after = None;
    }

    /// Number of `begin_frame` calls.
    pub fn frames_opened(&self) -> usize {
        self.frames_opened
    }

    /// Number of `end_frame` calls.
    pub fn frames_closed(&self) -> usize {
        self.frames_closed
    }

    /// Number of `configure` calls.
    pub fn configure_calls(&self) -> usize {
        self.configure_calls
    }

    /// Whether a frame is currently open (FSYNC low).
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }
}

impl Transport for RecordingTransport {
    type Error = MockError;

    fn configure(&mut self) -> Result<(), Self::Error> {
        self.configure_calls = self.configure_calls.saturating_add(1);
        Ok(())
    }

    fn begin_frame(&mut self) -> Result<(), Self::Error> {
        if self.configure_calls == 0 {
            return Err(MockError::NotConfigured);
        }
        if self.in_frame {
            return Err(MockError::NestedFrame);
        }
        self.in_frame = true;
        self.pending.clear();
        self.frames_opened = self.frames_opened.saturating_add(1);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), Self::Error> {
        self.in_frame = false;
        self.frames_closed = self.frames_closed.saturating_add(1);
        let word = match self.pending.as_slice() {
            [high, low] => u16::from_be_bytes([*high, *low]),
            other => {
                let len = other.len();
                self.pending.clear();
                return Err(MockError::BadFrameLength(len));
            }
        };
        self.pending.clear();
        self.words.push(word).map_err(|_| MockError::LogFull)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        if !self.in_frame {
            return Err(MockError::NotFramed);
        }
        let index = self.bytes_transferred;
        self.bytes_transferred = self.bytes_transferred.saturating_add(1);
        if self.fail_after.is_some_and(|limit| index >= limit) {
            return Err(MockError::Injected);
        }
        self.pending
            .push(byte)
            .map_err(|_| MockError::BadFrameLength(3))?;
        Ok(0)
    }
}
