use crate::{
    dsp::oscillator::Oscillator,
    synth::{
        allocator::{RoundRobin, StealPolicy},
        voice::Voice,
    },
};

/// Per-sample pitch modulation shared by every voice in the pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchMod {
    /// Pitch-bend offset in semitones.
    pub bend: f32,
    /// Peak vibrato in semitones (depth already scaled by the mod wheel).
    pub vibrato_depth: f32,
}

/// Fixed pool of melodic voices.
///
/// Allocation order for a note-on:
/// 1. a voice already sounding this note (retrigger in place)
/// 2. any free voice
/// 3. whatever the steal policy picks
///
/// The first rule is what keeps two held voices from ever sharing a note.
pub struct VoicePool<P: StealPolicy = RoundRobin> {
    voices: Vec<Voice>,
    policy: P,
    vibrato: Oscillator,
}

impl VoicePool<RoundRobin> {
    pub fn new(sample_rate: f32, voice_count: usize) -> Self {
        Self::with_policy(sample_rate, voice_count, RoundRobin::new())
    }
}

impl<P: StealPolicy> VoicePool<P> {
    pub fn with_policy(sample_rate: f32, voice_count: usize, policy: P) -> Self {
        let voices = (0..voice_count.max(1))
            .map(|_| Voice::new(sample_rate))
            .collect();

        let mut vibrato = Oscillator::sine(sample_rate);
        vibrato.set_freq(5.0);

        Self {
            voices,
            policy,
            vibrato,
        }
    }

    /// Start `note` and return the slot it landed in.
    pub fn note_on(&mut self, note: u8, velocity: u8, bend: f32) -> usize {
        let idx = self.allocate(note);
        let velocity = f32::from(velocity.min(127)) / 127.0;
        self.voices[idx].start(note, velocity, bend);
        idx
    }

    fn allocate(&mut self, note: u8) -> usize {
        if let Some(idx) = self
            .voices
            .iter()
            .position(|v| v.note() == note && v.is_sounding())
        {
            return idx;
        }

        if let Some(idx) = self.voices.iter().position(Voice::is_free) {
            return idx;
        }

        let idx = self.policy.select(&self.voices).min(self.voices.len() - 1);
        self.voices[idx].steal();
        idx
    }

    /// Lift every held key playing `note`.
    pub fn note_off(&mut self, note: u8, sustain_held: bool) {
        for voice in self
            .voices
            .iter_mut()
            .filter(|v| v.note() == note && v.key_down())
        {
            voice.key_up(sustain_held);
        }
    }

    /// Pedal lifted: release everything the pedal was holding.
    pub fn release_sustained(&mut self) {
        for voice in &mut self.voices {
            voice.release_sustained();
        }
    }

    pub fn set_envelope(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        for voice in &mut self.voices {
            voice.set_envelope(attack, decay, sustain, release);
        }
    }

    pub fn set_vibrato_rate(&mut self, hz: f32) {
        self.vibrato.set_freq(hz);
    }

    /// Add one sample from every live voice.
    ///
    /// Frequencies are recomputed every sample so vibrato and bend move
    /// mid-block.
    #[inline]
    pub fn next_sample(&mut self, pitch: PitchMod) -> f32 {
        let lfo = self.vibrato.next_sample();
        let bend = pitch.bend + lfo * pitch.vibrato_depth;

        let mut dry = 0.0;
        for voice in &mut self.voices {
            dry += voice.next_sample(bend);
        }
        dry
    }

    /// Accumulate a block of voice output into `out`.
    pub fn render(&mut self, out: &mut [f32], pitch: PitchMod) {
        for sample in out.iter_mut() {
            *sample += self.next_sample(pitch);
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Voices that count toward polyphony (`active || key_down`).
    pub fn sounding_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_sounding()).count()
    }
}
