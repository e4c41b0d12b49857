use crate::{control::cc, MAX_BLOCK_SIZE};

/// Sizes and fixed settings, read once when the engine is built.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Expected block length from the audio driver. Sizes the internal
    /// scratch buffers (capped at `MAX_BLOCK_SIZE`); longer blocks are
    /// rendered in pieces of this length.
    pub block_size: usize,
    /// Wire channel (0-based) the engine listens on.
    pub channel: u8,
    pub voices: usize,
    pub drum_voices: usize,
    pub max_loop_seconds: f32,
    pub queue_capacity: usize,
    /// Semitones at full pitch-bend deflection.
    pub pitch_bend_range: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            block_size: 48,
            channel: cc::SYNTH_CHANNEL,
            voices: 6,
            drum_voices: 8,
            max_loop_seconds: 8.0,
            queue_capacity: 256,
            pitch_bend_range: 2.0,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Scratch length the engine renders in, at least one frame.
    pub fn scratch_len(&self) -> usize {
        self.block_size.clamp(1, MAX_BLOCK_SIZE)
    }

    /// Looper buffer length in frames.
    pub fn loop_capacity(&self) -> usize {
        (self.max_loop_seconds.max(0.0) * self.sample_rate).round().max(1.0) as usize
    }
}
