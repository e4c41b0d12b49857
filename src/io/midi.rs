//! Three-byte MIDI frames as they arrive from the control surface.
//!
//! Only the four channel-voice messages the engine understands are decoded:
//! note on (0x90), note off (0x80), control change (0xB0) and pitch bend
//! (0xE0). No running status, no sysex.

use crate::error::DecodeError;

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xB0;
const PITCH_BEND: u8 = 0xE0;

/// Frame length on the wire.
pub const FRAME_LEN: usize = 3;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, lsb: u8, msb: u8 },
}

impl MidiEvent {
    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. } => channel,
        }
    }

    /// Build a pitch-bend event from a 14-bit value (0..=16383, center 8192).
    pub fn pitch_bend(channel: u8, value: u16) -> Self {
        let value = value.min(0x3FFF);
        MidiEvent::PitchBend {
            channel,
            lsb: (value & 0x7F) as u8,
            msb: (value >> 7) as u8,
        }
    }

    /// Decode one complete frame. Extra trailing bytes are ignored.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        let Some(&status) = frame.first() else {
            return Err(DecodeError::Truncated(0));
        };
        if status & 0x80 == 0 {
            return Err(DecodeError::MissingStatus(status));
        }
        if !is_supported(status) {
            return Err(DecodeError::UnsupportedStatus(status));
        }
        if frame.len() < FRAME_LEN {
            return Err(DecodeError::Truncated(frame.len()));
        }

        let (d1, d2) = (frame[1], frame[2]);
        for byte in [d1, d2] {
            if byte & 0x80 != 0 {
                return Err(DecodeError::DataOutOfRange(byte));
            }
        }

        Ok(from_parts(status, d1, d2))
    }

    pub fn encode(&self) -> [u8; FRAME_LEN] {
        match *self {
            MidiEvent::NoteOn { channel, key, velocity } => {
                [NOTE_ON | (channel & 0x0F), key & 0x7F, velocity & 0x7F]
            }
            MidiEvent::NoteOff { channel, key, velocity } => {
                [NOTE_OFF | (channel & 0x0F), key & 0x7F, velocity & 0x7F]
            }
            MidiEvent::ControlChange { channel, controller, value } => {
                [CONTROL_CHANGE | (channel & 0x0F), controller & 0x7F, value & 0x7F]
            }
            MidiEvent::PitchBend { channel, lsb, msb } => {
                [PITCH_BEND | (channel & 0x0F), lsb & 0x7F, msb & 0x7F]
            }
        }
    }
}

#[inline]
fn is_supported(status: u8) -> bool {
    matches!(status & 0xF0, NOTE_OFF | NOTE_ON | CONTROL_CHANGE | PITCH_BEND)
}

fn from_parts(status: u8, d1: u8, d2: u8) -> MidiEvent {
    let channel = status & 0x0F;
    match status & 0xF0 {
        NOTE_ON => MidiEvent::NoteOn { channel, key: d1, velocity: d2 },
        NOTE_OFF => MidiEvent::NoteOff { channel, key: d1, velocity: d2 },
        CONTROL_CHANGE => MidiEvent::ControlChange { channel, controller: d1, value: d2 },
        _ => MidiEvent::PitchBend { channel, lsb: d1, msb: d2 },
    }
}

/// Byte-at-a-time decoder for the serial stream.
///
/// A status byte always starts a new frame, so a byte lost on the wire costs
/// at most one message. Real-time bytes (0xF8..=0xFF) may appear anywhere and
/// are skipped; any other system byte abandons the frame in progress.
#[derive(Debug, Default, Clone)]
pub struct MidiParser {
    status: Option<u8>,
    data: [u8; 2],
    len: usize,
}

impl MidiParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte. Yields an event once a frame completes.
    pub fn push(&mut self, byte: u8) -> Result<Option<MidiEvent>, DecodeError> {
        if byte >= 0xF8 {
            return Ok(None);
        }

        if byte & 0x80 != 0 {
            self.len = 0;
            if byte >= 0xF0 {
                self.status = None;
                return Ok(None);
            }
            if !is_supported(byte) {
                self.status = None;
                return Err(DecodeError::UnsupportedStatus(byte));
            }
            self.status = Some(byte);
            return Ok(None);
        }

        let Some(status) = self.status else {
            return Err(DecodeError::MissingStatus(byte));
        };

        self.data[self.len] = byte;
        self.len += 1;
        if self.len < self.data.len() {
            return Ok(None);
        }

        // no running status: the next frame needs its own status byte
        self.status = None;
        self.len = 0;
        Ok(Some(from_parts(status, self.data[0], self.data[1])))
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.status = None;
        self.len = 0;
    }

    pub fn is_mid_frame(&self) -> bool {
        self.status.is_some()
    }
}
