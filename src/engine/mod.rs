// Purpose: the render scheduler. Owns every stateful component, drains the
// command queue at block boundaries, and produces stereo blocks.

pub mod config;
pub mod scheduler;

pub use config::EngineConfig;
pub use scheduler::Groovebox;

use rtrb::RingBuffer;

use crate::{io::sender::CommandSender, synth::RoundRobin};

/// Build a connected sender/engine pair.
///
/// The sender stays on the control side; the engine moves to the audio
/// callback.
pub fn channel(config: EngineConfig) -> (CommandSender, Groovebox<RoundRobin>) {
    let (tx, rx) = RingBuffer::new(config.queue_capacity.max(1));
    (CommandSender::new(tx), Groovebox::new(config, rx))
}
