use crate::synth::voice::Voice;

/// Chooses which busy voice to take over when the pool is exhausted.
///
/// Only consulted after the pool has looked for a voice already playing the
/// note and for a free voice, so `voices` is always fully busy here.
pub trait StealPolicy: Send {
    /// Return the slot index to steal. Must be `< voices.len()`.
    fn select(&mut self, voices: &[Voice]) -> usize;
}

/// Steal whatever the cursor points at, then advance it by one.
///
/// Deterministic and O(1). It ignores envelope stage, so it can cut a voice
/// that was struck a moment ago while an older, quieter one keeps ringing.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin {
    cursor: usize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl StealPolicy for RoundRobin {
    fn select(&mut self, voices: &[Voice]) -> usize {
        let len = voices.len().max(1);
        let idx = self.cursor % len;
        self.cursor = (idx + 1) % len;
        idx
    }
}

impl<F> StealPolicy for F
where
    F: FnMut(&[Voice]) -> usize + Send,
{
    fn select(&mut self, voices: &[Voice]) -> usize {
        self(voices)
    }
}
