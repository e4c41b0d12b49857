use crate::MIN_TIME;

/*
Gated ADSR Envelope
===================

The melodic voices drive their envelope with a *gate* rather than discrete
note_on/note_off calls. The gate is decoupled from the physical key so the
sustain pedal can hold a note after the key is lifted:

    key down ──► gate high ──► Attack → Decay → Sustain
    key up   ──► gate low  ──► Release            (pedal up)
    key up   ──► gate high ──► stays in Sustain   (pedal down)

`process(gate)` is called once per sample and edge-detects the gate:

  - gate high while Idle or Release  → Attack, starting from the CURRENT level
  - gate low while Attack/Decay/Sus  → Release, starting from the CURRENT level

Starting both ramps from the current level means a retrigger or a steal never
jumps the output, so neither clicks.


Linear Ramps
------------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

    increment = target_change / (time_seconds * sample_rate)

Attack and decay recompute their increment every sample so a controller move
lands on the very next sample. Release snapshots its start level and length
when it begins and interpolates, so it reaches exactly 0.0 after
`release_time` seconds and never rises on the way down.


One-shot Decay
--------------

Percussion does not need a gate: `DecayEnvelope` jumps to an amplitude on
trigger and decays exponentially, falling 60 dB over the requested duration:

    factor = exp(-ln(1000) / (duration * sample_rate))
    level[n+1] = level[n] * factor
*/

/// Natural log of 1000: a 60 dB drop.
const DB60: f32 = 6.907_755;

/// The current stage of the envelope state machine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Gate low, envelope inactive, level = 0
    Attack,  // Gate high, ramping up to 1.0
    Decay,   // Reached peak, ramping down to sustain level
    Sustain, // Holding at sustain level while gate is high
    Release, // Gate low, ramping down to 0
}

pub struct Envelope {
    attack_time: f32,   // seconds to ramp 0 → 1
    decay_time: f32,    // seconds to ramp 1 → sustain
    sustain_level: f32, // level to hold (0.0 - 1.0)
    release_time: f32,  // seconds to ramp current → 0
    sample_rate: f32,

    stage: EnvelopeState,
    level: f32,

    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self::adsr(sample_rate, 0.01, 0.25, 0.8, 0.4)
    }

    pub fn adsr(sample_rate: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),
            sample_rate,

            stage: EnvelopeState::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// Update all four segments at once. Takes effect on the next sample.
    pub fn set_adsr(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack_time = attack.max(MIN_TIME);
        self.decay_time = decay.max(MIN_TIME);
        self.sustain_level = sustain.clamp(0.0, 1.0);
        self.release_time = release.max(MIN_TIME);
    }

    /// Restart the attack from the current level, whatever the gate did.
    ///
    /// Used when a held note is struck again or a voice is stolen: the gate
    /// may already be high, so there is no edge for `process` to see.
    pub fn retrigger(&mut self) {
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    fn begin_release(&mut self) {
        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * self.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance one sample with the given gate and return the new level.
    pub fn process(&mut self, gate: bool) -> f32 {
        match (gate, self.stage) {
            (true, EnvelopeState::Idle | EnvelopeState::Release) => {
                self.stage = EnvelopeState::Attack;
            }
            (false, EnvelopeState::Attack | EnvelopeState::Decay | EnvelopeState::Sustain) => {
                self.begin_release();
            }
            _ => {}
        }

        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += 1.0 / (self.attack_time * self.sample_rate);

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.sustain_level;
                let decrement = (1.0 - target) / (self.decay_time * self.sample_rate);
                self.level -= decrement;

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

/// One-shot exponential decay used by the drum voices.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayEnvelope {
    level: f32,
    factor: f32,
}

impl DecayEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `amplitude` and fall 60 dB over `duration` seconds.
    pub fn trigger(&mut self, amplitude: f32, duration: f32, sample_rate: f32) {
        self.level = amplitude.max(0.0);
        self.factor = (-DB60 / (duration.max(MIN_TIME) * sample_rate)).exp();
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let out = self.level;
        self.level *= self.factor;
        out
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}
