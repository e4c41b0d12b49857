pub mod control; // Controller table, parameter store, command interpreter
pub mod drums;
pub mod dsp;
pub mod effects;
pub mod engine; // Render scheduler and configuration
pub mod error;
pub mod io;
pub mod looper;
pub mod synth; // Voice management and polyphony

pub use engine::{channel, EngineConfig, Groovebox};
pub use error::{DecodeError, Error, SendError};
pub use io::{CommandSender, MidiEvent, MidiParser};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

/// Envelope level below which a released voice is considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;
