use std::f32::consts::TAU;

/*
| type              | output tap | passes          | rejects      |
| ----------------- | ---------- | --------------- | ------------ |
| low-pass          | v2         | below cutoff    | above cutoff |
| high-pass         | x - kv1-v2 | above cutoff    | below cutoff |
| band-pass         | v1         | around cutoff   | far away     |

Topology-preserving (trapezoidal) state-variable filter. Coefficients are
recomputed only when cutoff or resonance is written, so `process` is a handful
of multiply-adds per sample.

Resonance is 0..1 at the API and maps to damping k = 2 - 2·r. At r = 1 the
damping reaches zero and the filter rings forever, so writes are clamped to
MAX_RESONANCE and cutoff is held below Nyquist.
*/

/// Highest resonance the filter will accept; keeps k ≥ 0.1.
pub const MAX_RESONANCE: f32 = 0.95;
const MIN_CUTOFF_HZ: f32 = 20.0;
/// Cutoff ceiling as a fraction of the sample rate.
const MAX_CUTOFF_RATIO: f32 = 0.45;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,
    filter_type: FilterType,

    g: f32,
    k: f32,
    h: f32,
}

impl SVFilter {
    pub fn new(sample_rate: f32, filter_type: FilterType, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            sample_rate,
            filter_type,
            g: 0.0,
            k: 2.0,
            h: 1.0,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    pub fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self::new(sample_rate, FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self::new(sample_rate, FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        Self::new(sample_rate, FilterType::BandPass, cutoff_hz)
    }

    fn update_coefficients(&mut self) {
        self.g = (TAU * self.cutoff_hz / (2.0 * self.sample_rate)).tan();
        self.k = 2.0 - 2.0 * self.resonance;
        self.h = 1.0 / (1.0 + self.g * (self.g + self.k));
    }

    #[inline]
    pub fn tick(&mut self, sample: f32) -> FilterOutputs {
        let v3 = sample - self.ic2eq;
        let v1 = self.h * (self.ic1eq + self.g * v3);
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - self.k * v1 - v2,
        }
    }

    /// Filter one sample through the configured response.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let outputs = self.tick(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_type(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        let ceiling = (self.sample_rate * MAX_CUTOFF_RATIO).max(MIN_CUTOFF_HZ);
        self.cutoff_hz = if cutoff.is_finite() {
            cutoff.clamp(MIN_CUTOFF_HZ, ceiling)
        } else {
            ceiling
        };
        self.update_coefficients();
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = if resonance.is_finite() {
            resonance.clamp(0.0, MAX_RESONANCE)
        } else {
            0.0
        };
        self.update_coefficients();
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }
}
