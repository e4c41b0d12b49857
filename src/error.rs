//! Errors surfaced to the control context.
//!
//! The render path never fails; these only describe why a frame from the
//! serial link could not be turned into a command, or why a command could not
//! be queued for the next block.

use thiserror::Error;

use crate::io::midi::MidiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("frame does not start with a status byte (got {0:#04x})")]
    MissingStatus(u8),
    #[error("unsupported status byte {0:#04x}")]
    UnsupportedStatus(u8),
    #[error("data byte {0:#04x} has the high bit set")]
    DataOutOfRange(u8),
    #[error("frame too short: expected 3 bytes, got {0}")]
    Truncated(usize),
}

#[derive(Debug, Clone, Copy, Error)]
pub enum SendError {
    /// The command queue is full; the event is handed back to the caller.
    #[error("command queue full, dropped {0:?}")]
    QueueFull(MidiEvent),
}

#[derive(Debug, Clone, Copy, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Send(#[from] SendError),
}
