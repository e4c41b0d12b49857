use rtrb::{Producer, PushError};

use crate::{
    error::{Error, SendError},
    io::midi::{MidiEvent, MidiParser},
};

/// Control-context half of the command queue.
///
/// Never blocks: a full queue hands the event back instead of waiting for the
/// render thread.
pub struct CommandSender {
    tx: Producer<MidiEvent>,
}

impl CommandSender {
    pub fn new(tx: Producer<MidiEvent>) -> Self {
        Self { tx }
    }

    pub fn send(&mut self, event: MidiEvent) -> Result<(), SendError> {
        self.tx.push(event).map_err(|PushError::Full(event)| {
            log::warn!("command queue full, dropping {event:?}");
            SendError::QueueFull(event)
        })
    }

    /// Decode a complete 3-byte frame and queue it.
    pub fn send_frame(&mut self, frame: &[u8]) -> Result<(), Error> {
        let event = MidiEvent::decode(frame).inspect_err(|err| {
            log::debug!("dropping frame {frame:02x?}: {err}");
        })?;
        self.send(event)?;
        Ok(())
    }

    /// Run raw serial bytes through `parser` and queue every completed event.
    ///
    /// Bad bytes are logged and skipped; only a full queue stops the feed.
    /// Returns the number of events queued.
    pub fn send_bytes(&mut self, parser: &mut MidiParser, bytes: &[u8]) -> Result<usize, SendError> {
        let mut queued = 0;
        for &byte in bytes {
            match parser.push(byte) {
                Ok(Some(event)) => {
                    self.send(event)?;
                    queued += 1;
                }
                Ok(None) => {}
                Err(err) => log::debug!("skipping byte {byte:#04x}: {err}"),
            }
        }
        Ok(queued)
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}
