use std::f32::consts::TAU;

/*
Phase-accumulator oscillators. Phase lives in [0, 1) and advances by
freq / sample_rate each sample; every waveform is a pure function of phase,
so changing frequency mid-block (vibrato, pitch bend) never produces a jump.

  Sine      sin(2π·phase)               pure tone, used for LFO and drum bodies
  Saw       2·phase - 1                 bright, all harmonics
  Triangle  1 - 4·|phase - 0.5|         soft, odd harmonics
*/

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Saw,
    Triangle,
}

pub struct Oscillator {
    waveform: OscillatorWaveform,
    phase: f32,
    increment: f32,
    amplitude: f32,
    sample_rate: f32,
}

impl Oscillator {
    pub fn new(sample_rate: f32, waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            increment: 0.0,
            amplitude: 1.0,
            sample_rate,
        }
    }

    pub fn sine(sample_rate: f32) -> Self {
        Self::new(sample_rate, OscillatorWaveform::Sine)
    }

    pub fn saw(sample_rate: f32) -> Self {
        Self::new(sample_rate, OscillatorWaveform::Saw)
    }

    pub fn triangle(sample_rate: f32) -> Self {
        Self::new(sample_rate, OscillatorWaveform::Triangle)
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    #[inline]
    pub fn set_freq(&mut self, freq: f32) {
        // Above Nyquist the phase would alias backwards; hold it at Nyquist.
        self.increment = (freq / self.sample_rate).clamp(0.0, 0.5);
    }

    /// Current frequency in Hz, after the Nyquist clamp.
    pub fn freq(&self) -> f32 {
        self.increment * self.sample_rate
    }

    pub fn reset_phase(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Render the current sample, then advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * self.phase).sin(),
            OscillatorWaveform::Saw => 2.0 * self.phase - 1.0,
            OscillatorWaveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
        };

        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        value * self.amplitude
    }
}

/// White noise from a 32-bit linear congruential generator.
///
/// Cheap and allocation-free; the mantissa trick maps the top 23 bits straight
/// to a float in [1, 2).
pub struct NoiseSource {
    state: u32,
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Next sample in [-1, 1).
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let bits = (self.state >> 9) | 0x3F80_0000;
        (f32::from_bits(bits) - 1.0) * 2.0 - 1.0
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(0x1234_5678)
    }
}

/// MIDI note (fractional, so bend and vibrato fit in) to Hz. A4 = 69 = 440 Hz.
#[inline]
pub fn midi_to_hz(note: f32) -> f32 {
    440.0 * 2.0_f32.powf((note - 69.0) / 12.0)
}
