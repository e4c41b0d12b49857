//! The parameter store: every control-plane value the engine reads.
//!
//! Only the interpreter writes here, and it does so between render blocks, so
//! every component sees one consistent snapshot for the whole block.

use super::cc;

pub const MIN_CUTOFF_HZ: f32 = 80.0;
pub const MAX_CUTOFF_HZ: f32 = 10_000.0;

pub const MIN_DELAY_SECONDS: f32 = 0.02;
pub const MAX_DELAY_SECONDS: f32 = 1.0;
pub const MAX_DELAY_FEEDBACK: f32 = 0.95;

/// Pitch-bend values this close to center snap to exactly zero.
pub const BEND_DEADZONE: i32 = 256;
const BEND_CENTER: i32 = 8192;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstrumentMode {
    #[default]
    PolySynth,
    DrumKit,
}

impl InstrumentMode {
    pub fn from_cc(value: u8) -> Self {
        if value >= cc::SWITCH_ON {
            InstrumentMode::DrumKit
        } else {
            InstrumentMode::PolySynth
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    pub master_gain: f32,
    pub cutoff: f32,
    pub resonance: f32,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub vibrato_rate: f32,
    /// Semitones of vibrato at full mod wheel.
    pub vibrato_depth: f32,
    pub mod_wheel: f32,
    pub pitch_bend: f32,
    pub sustain_pedal: bool,
    pub mode: InstrumentMode,

    pub delay_time: f32,
    pub delay_feedback: f32,
    pub delay_mix: f32,
    pub reverb_time: f32,
    pub reverb_mix: f32,
    pub bass_boost: f32,
    pub drive: f32,
    pub looper_level: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            master_gain: 0.4,
            cutoff: 3_000.0,
            resonance: 0.25,
            attack: 0.01,
            decay: 0.25,
            sustain: 0.8,
            release: 0.4,
            vibrato_rate: 5.0,
            vibrato_depth: 0.25,
            mod_wheel: 0.0,
            pitch_bend: 0.0,
            sustain_pedal: false,
            mode: InstrumentMode::PolySynth,

            delay_time: 0.35,
            delay_feedback: 0.35,
            delay_mix: 0.0,
            reverb_time: 0.5,
            reverb_mix: 0.0,
            bass_boost: 0.0,
            drive: 0.0,
            looper_level: 0.8,
        }
    }
}

/// 0..127 → 0..1. Values above 127 are clamped.
#[inline]
pub fn normalize(value: u8) -> f32 {
    f32::from(value.min(127)) / 127.0
}

impl ParameterSet {
    /// Store a continuous controller. Returns false for controllers that are
    /// not plain scalars (pedal, mode, looper) or are unknown; the caller
    /// decides what to do with those.
    pub fn set_controller(&mut self, controller: u8, value: u8) -> bool {
        let n = normalize(value);

        match controller {
            cc::VOLUME => self.master_gain = n.powf(1.5),
            cc::CUTOFF => {
                self.cutoff = MIN_CUTOFF_HZ * (MAX_CUTOFF_HZ / MIN_CUTOFF_HZ).powf(n * n)
            }
            cc::RESONANCE => self.resonance = 0.1 + 0.9 * n,
            cc::ATTACK => self.attack = 0.001 + 2.0 * n,
            cc::DECAY => self.decay = 0.01 + 3.0 * n,
            cc::SUSTAIN => self.sustain = n,
            cc::RELEASE => self.release = 0.02 + 4.0 * n,
            cc::VIBRATO_RATE => self.vibrato_rate = 0.1 + 8.0 * n,
            cc::MODWHEEL => self.mod_wheel = n,
            cc::DELAY_TIME => {
                self.delay_time = (0.02 + 0.98 * n).clamp(MIN_DELAY_SECONDS, MAX_DELAY_SECONDS)
            }
            cc::DELAY_FEEDBACK => self.delay_feedback = (0.02 + 0.9 * n).min(MAX_DELAY_FEEDBACK),
            cc::DELAY_MIX => self.delay_mix = n,
            cc::REVERB_MIX => self.reverb_mix = n,
            cc::REVERB_TIME => self.reverb_time = n,
            cc::BASS_BOOST => self.bass_boost = n,
            cc::DRIVE => self.drive = n,
            cc::LOOPER_LEVEL => self.looper_level = n,
            _ => return false,
        }

        true
    }

    /// Compose a 14-bit bend and store it as semitones.
    pub fn set_pitch_bend(&mut self, lsb: u8, msb: u8, range: f32) {
        self.pitch_bend = bend_semitones(lsb, msb, range);
    }
}

/// 14-bit pitch bend → semitones in ±`range`.
///
/// Positive offsets divide by 8191 and negative by 8192 so 16383 and 0 land on
/// exactly +range and -range.
pub fn bend_semitones(lsb: u8, msb: u8, range: f32) -> f32 {
    let value = (i32::from(msb & 0x7F) << 7) | i32::from(lsb & 0x7F);
    let centered = value - BEND_CENTER;

    if centered.abs() < BEND_DEADZONE {
        return 0.0;
    }

    let span = if centered > 0 { BEND_CENTER - 1 } else { BEND_CENTER };
    let norm = (centered as f32 / span as f32).clamp(-1.0, 1.0);
    norm * range
}
