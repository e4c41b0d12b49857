// Purpose - the command stream boundary: wire frames in, queued events out.

pub mod midi;
pub mod sender;

pub use midi::{MidiEvent, MidiParser};
pub use sender::CommandSender;
