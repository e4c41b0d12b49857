//! Drum kinds, their synthesis recipes, and the note map.
//!
//! Every hit is a sine "tone" plus filtered white "noise", each with its own
//! exponential decay. What makes a kick a kick is just the numbers:
//!
//! - Kick / toms: tone-dominant. The tone starts a few times above its base
//!   frequency and sweeps down fast, which is the "punch".
//! - Snare: tone body under band-passed noise rattle.
//! - Hats / clap: noise only, filtered bright (hats) or mid (clap).
//! - Percussion: short, high, mostly tonal blip (rim / cowbell territory).

use crate::dsp::filter::FilterType;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrumKind {
    Kick,
    Snare,
    ClosedHat,
    OpenHat,
    TomLow,
    TomHigh,
    Clap,
    Percussion,
}

/// Amplitude at trigger and time to fall 60 dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayShape {
    pub amplitude: f32,
    pub duration: f32,
}

impl DecayShape {
    const SILENT: DecayShape = DecayShape {
        amplitude: 0.0,
        duration: 0.001,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrumRecipe {
    /// Tone frequency in Hz at velocity 0.
    pub base_freq: f32,
    /// Extra Hz added at full velocity (harder hits tune up).
    pub velocity_tune: f32,
    /// Pitch multiplier at the instant of the hit.
    pub sweep_start: f32,
    /// Time for the sweep to fall 60 dB of the way back to 1.0.
    pub sweep_time: f32,
    pub tone: DecayShape,
    pub noise: DecayShape,
    /// How the noise is coloured before mixing.
    pub noise_filter: FilterType,
    pub noise_cutoff: f32,
    pub tone_mix: f32,
    pub noise_mix: f32,
}

const KICK: DrumRecipe = DrumRecipe {
    base_freq: 48.0,
    velocity_tune: 10.0,
    sweep_start: 3.0,
    sweep_time: 0.04,
    tone: DecayShape { amplitude: 1.0, duration: 0.45 },
    noise: DecayShape { amplitude: 0.3, duration: 0.012 },
    noise_filter: FilterType::HighPass,
    noise_cutoff: 2_000.0,
    tone_mix: 1.0,
    noise_mix: 0.25,
};

const SNARE: DrumRecipe = DrumRecipe {
    base_freq: 180.0,
    velocity_tune: 20.0,
    sweep_start: 1.5,
    sweep_time: 0.02,
    tone: DecayShape { amplitude: 0.7, duration: 0.12 },
    noise: DecayShape { amplitude: 0.9, duration: 0.22 },
    noise_filter: FilterType::BandPass,
    noise_cutoff: 3_000.0,
    tone_mix: 0.5,
    noise_mix: 0.8,
};

const CLOSED_HAT: DrumRecipe = DrumRecipe {
    base_freq: 0.0,
    velocity_tune: 0.0,
    sweep_start: 1.0,
    sweep_time: 0.001,
    tone: DecayShape::SILENT,
    noise: DecayShape { amplitude: 0.7, duration: 0.06 },
    noise_filter: FilterType::HighPass,
    noise_cutoff: 7_000.0,
    tone_mix: 0.0,
    noise_mix: 1.0,
};

const OPEN_HAT: DrumRecipe = DrumRecipe {
    base_freq: 0.0,
    velocity_tune: 0.0,
    sweep_start: 1.0,
    sweep_time: 0.001,
    tone: DecayShape::SILENT,
    noise: DecayShape { amplitude: 0.6, duration: 0.4 },
    noise_filter: FilterType::HighPass,
    noise_cutoff: 6_000.0,
    tone_mix: 0.0,
    noise_mix: 1.0,
};

const TOM_LOW: DrumRecipe = DrumRecipe {
    base_freq: 95.0,
    velocity_tune: 15.0,
    sweep_start: 1.8,
    sweep_time: 0.06,
    tone: DecayShape { amplitude: 0.9, duration: 0.4 },
    noise: DecayShape { amplitude: 0.2, duration: 0.03 },
    noise_filter: FilterType::BandPass,
    noise_cutoff: 1_200.0,
    tone_mix: 1.0,
    noise_mix: 0.2,
};

const TOM_HIGH: DrumRecipe = DrumRecipe {
    base_freq: 160.0,
    velocity_tune: 20.0,
    sweep_start: 1.8,
    sweep_time: 0.05,
    tone: DecayShape { amplitude: 0.9, duration: 0.3 },
    noise: DecayShape { amplitude: 0.2, duration: 0.03 },
    noise_filter: FilterType::BandPass,
    noise_cutoff: 1_800.0,
    tone_mix: 1.0,
    noise_mix: 0.2,
};

const CLAP: DrumRecipe = DrumRecipe {
    base_freq: 0.0,
    velocity_tune: 0.0,
    sweep_start: 1.0,
    sweep_time: 0.001,
    tone: DecayShape::SILENT,
    noise: DecayShape { amplitude: 1.0, duration: 0.2 },
    noise_filter: FilterType::BandPass,
    noise_cutoff: 1_500.0,
    tone_mix: 0.0,
    noise_mix: 1.2,
};

const PERCUSSION: DrumRecipe = DrumRecipe {
    base_freq: 560.0,
    velocity_tune: 40.0,
    sweep_start: 1.1,
    sweep_time: 0.01,
    tone: DecayShape { amplitude: 0.7, duration: 0.12 },
    noise: DecayShape { amplitude: 0.25, duration: 0.02 },
    noise_filter: FilterType::BandPass,
    noise_cutoff: 2_500.0,
    tone_mix: 0.8,
    noise_mix: 0.3,
};

impl DrumKind {
    pub const ALL: [DrumKind; 8] = [
        DrumKind::Kick,
        DrumKind::Snare,
        DrumKind::ClosedHat,
        DrumKind::OpenHat,
        DrumKind::TomLow,
        DrumKind::TomHigh,
        DrumKind::Clap,
        DrumKind::Percussion,
    ];

    pub fn recipe(self) -> &'static DrumRecipe {
        match self {
            DrumKind::Kick => &KICK,
            DrumKind::Snare => &SNARE,
            DrumKind::ClosedHat => &CLOSED_HAT,
            DrumKind::OpenHat => &OPEN_HAT,
            DrumKind::TomLow => &TOM_LOW,
            DrumKind::TomHigh => &TOM_HIGH,
            DrumKind::Clap => &CLAP,
            DrumKind::Percussion => &PERCUSSION,
        }
    }

    /// General MIDI percussion numbers; anything unmapped plays a snare.
    pub fn from_note(note: u8) -> Self {
        match note {
            35 | 36 => DrumKind::Kick,
            38 | 40 => DrumKind::Snare,
            42 | 44 => DrumKind::ClosedHat,
            46 => DrumKind::OpenHat,
            41 | 43 | 45 => DrumKind::TomLow,
            47 | 48 | 50 => DrumKind::TomHigh,
            39 => DrumKind::Clap,
            37 | 56 | 75 | 76 | 77 => DrumKind::Percussion,
            _ => DrumKind::Snare,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DrumKind::Kick => "kick",
            DrumKind::Snare => "snare",
            DrumKind::ClosedHat => "closed-hat",
            DrumKind::OpenHat => "open-hat",
            DrumKind::TomLow => "tom-low",
            DrumKind::TomHigh => "tom-high",
            DrumKind::Clap => "clap",
            DrumKind::Percussion => "percussion",
        }
    }
}

impl DrumRecipe {
    /// Tone frequency for a 0..1 velocity.
    pub fn tone_freq(&self, velocity: f32) -> f32 {
        self.base_freq + self.velocity_tune * velocity
    }

    pub fn has_tone(&self) -> bool {
        self.tone.amplitude > 0.0 && self.tone_mix > 0.0
    }
}
