// Purpose: percussive voices. Each slot is a swept sine tone plus filtered
// noise; the kit recipe decides the balance.

pub mod kit;

pub use kit::{DecayShape, DrumKind, DrumRecipe};

use crate::dsp::{
    envelope::DecayEnvelope,
    filter::SVFilter,
    oscillator::{NoiseSource, Oscillator},
};

/// Both envelopes must fall below this before a slot frees up.
pub const DRUM_SILENCE: f32 = 0.001;

const DB60: f32 = 6.907_755;

pub struct DrumVoice {
    kind: DrumKind,
    sample_rate: f32,
    velocity: f32,
    active: bool,
    tone_freq: f32,
    pitch_scale: f32,
    sweep_decay: f32,
    tone: Oscillator,
    tone_env: DecayEnvelope,
    noise: NoiseSource,
    noise_env: DecayEnvelope,
    noise_filter: SVFilter,
}

impl DrumVoice {
    pub fn new(sample_rate: f32, seed: u32) -> Self {
        let recipe = DrumKind::Snare.recipe();
        Self {
            kind: DrumKind::Snare,
            sample_rate,
            velocity: 0.0,
            active: false,
            tone_freq: recipe.base_freq,
            pitch_scale: 1.0,
            sweep_decay: 0.0,
            tone: Oscillator::sine(sample_rate),
            tone_env: DecayEnvelope::new(),
            noise: NoiseSource::new(seed),
            noise_env: DecayEnvelope::new(),
            noise_filter: SVFilter::new(sample_rate, recipe.noise_filter, recipe.noise_cutoff),
        }
    }

    /// Start a fresh hit. Whatever the slot was doing is discarded.
    pub fn trigger(&mut self, kind: DrumKind, velocity: f32) {
        let recipe = kind.recipe();
        let sr = self.sample_rate;

        self.kind = kind;
        self.velocity = velocity.clamp(0.0, 1.0);
        self.active = true;

        self.tone_freq = recipe.tone_freq(self.velocity);
        self.pitch_scale = recipe.sweep_start;
        self.sweep_decay = (-DB60 / (recipe.sweep_time * sr).max(1.0)).exp();
        self.tone.reset_phase();

        self.tone_env
            .trigger(recipe.tone.amplitude, recipe.tone.duration, sr);
        self.noise_env
            .trigger(recipe.noise.amplitude, recipe.noise.duration, sr);

        self.noise_filter.set_type(recipe.noise_filter);
        self.noise_filter.set_cutoff(recipe.noise_cutoff);
        self.noise_filter.reset();
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if !self.active {
            return 0.0;
        }

        let recipe = self.kind.recipe();

        let tone = if recipe.has_tone() {
            self.tone.set_freq(self.tone_freq * self.pitch_scale);
            self.pitch_scale = 1.0 + (self.pitch_scale - 1.0) * self.sweep_decay;
            self.tone.next_sample() * self.tone_env.next_sample() * recipe.tone_mix
        } else {
            self.tone_env.next_sample();
            0.0
        };

        let noise = self.noise_filter.process(self.noise.next_sample())
            * self.noise_env.next_sample()
            * recipe.noise_mix;

        if self.tone_env.level() < DRUM_SILENCE && self.noise_env.level() < DRUM_SILENCE {
            self.active = false;
        }

        (tone + noise) * self.velocity
    }

    pub fn silence(&mut self) {
        self.active = false;
        self.tone_env.reset();
        self.noise_env.reset();
        self.noise_filter.reset();
    }

    pub fn kind(&self) -> DrumKind {
        self.kind
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pitch_scale(&self) -> f32 {
        self.pitch_scale
    }
}

/// Fixed set of drum slots.
///
/// A hit takes the first idle slot. With every slot busy it overwrites
/// slot 0, which can click.
pub struct DrumEngine {
    voices: Vec<DrumVoice>,
}

impl DrumEngine {
    pub fn new(sample_rate: f32, slot_count: usize) -> Self {
        let voices = (0..slot_count.max(1) as u32)
            .map(|i| DrumVoice::new(sample_rate, 0x1234_5678 ^ i.wrapping_mul(0x9E37_79B9)))
            .collect();
        Self { voices }
    }

    /// Trigger the drum mapped to `note`. Returns the slot used.
    pub fn trigger(&mut self, note: u8, velocity: u8) -> usize {
        let kind = DrumKind::from_note(note);
        let idx = self
            .voices
            .iter()
            .position(|v| !v.is_active())
            .unwrap_or(0);
        self.voices[idx].trigger(kind, f32::from(velocity.min(127)) / 127.0);
        idx
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mut out = 0.0;
        for voice in &mut self.voices {
            out += voice.next_sample();
        }
        out
    }

    /// Accumulate a block of drum output into `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample += self.next_sample();
        }
    }

    pub fn clear(&mut self) {
        for voice in &mut self.voices {
            voice.silence();
        }
    }

    pub fn voices(&self) -> &[DrumVoice] {
        &self.voices
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }
}
