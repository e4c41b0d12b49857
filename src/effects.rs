//! The fixed effects chain applied to the summed dry signal.
//!
//! ```text
//! dry ─► SVF low-pass ─► + lp150·bass ─► tanh drive ─► + delay·mix ─┬─► + revL·mix ─► L
//!                                                                   └─► + revR·mix ─► R
//! ```
//!
//! Everything is mono until the reverb, which is where left and right part.
//! Parameter changes land on the next sample with no smoothing.

use crate::{
    control::params::{
        ParameterSet, MAX_DELAY_FEEDBACK, MAX_DELAY_SECONDS, MIN_DELAY_SECONDS,
    },
    dsp::{delay::DelayLine, distortion::saturate, filter::SVFilter, reverb::StereoReverb},
};

/// Fixed corner of the bass-boost low-pass.
pub const BASS_BOOST_HZ: f32 = 150.0;

const REVERB_DAMPING: f32 = 0.3;

pub struct EffectsChain {
    sample_rate: f32,
    filter: SVFilter,
    bass_filter: SVFilter,
    delay: DelayLine,
    reverb: StereoReverb,

    bass_boost: f32,
    drive: f32,
    delay_feedback: f32,
    delay_mix: f32,
    reverb_mix: f32,
}

impl EffectsChain {
    /// Every buffer is sized here; nothing grows afterwards.
    pub fn new(sample_rate: f32) -> Self {
        let delay_capacity = (MAX_DELAY_SECONDS * sample_rate).ceil() as usize + 1;
        let mut reverb = StereoReverb::new(sample_rate);
        reverb.set_damping(REVERB_DAMPING);

        let mut chain = Self {
            sample_rate,
            filter: SVFilter::lowpass(sample_rate, 3_000.0),
            bass_filter: SVFilter::lowpass(sample_rate, BASS_BOOST_HZ),
            delay: DelayLine::new(delay_capacity),
            reverb,
            bass_boost: 0.0,
            drive: 0.0,
            delay_feedback: 0.0,
            delay_mix: 0.0,
            reverb_mix: 0.0,
        };
        chain.configure(&ParameterSet::default());
        chain
    }

    /// Pull every effect setting from the parameter snapshot, clamping into
    /// stable ranges.
    pub fn configure(&mut self, params: &ParameterSet) {
        self.filter.set_cutoff(params.cutoff);
        self.filter.set_resonance(params.resonance);

        let seconds = finite_or(params.delay_time, MIN_DELAY_SECONDS)
            .clamp(MIN_DELAY_SECONDS, MAX_DELAY_SECONDS);
        let min_samples = (MIN_DELAY_SECONDS * self.sample_rate).ceil() as usize;
        let samples = ((seconds * self.sample_rate).round() as usize).max(min_samples);
        self.delay.set_delay(samples);

        self.delay_feedback = finite_or(params.delay_feedback, 0.0).clamp(0.0, MAX_DELAY_FEEDBACK);
        self.delay_mix = unit(params.delay_mix);
        self.reverb_mix = unit(params.reverb_mix);
        self.bass_boost = unit(params.bass_boost);
        self.drive = unit(params.drive);
        self.reverb.set_time(params.reverb_time);
    }

    /// One dry sample in, one stereo sample out.
    #[inline]
    pub fn process(&mut self, dry: f32) -> (f32, f32) {
        let filtered = self.filter.process(dry);
        let boosted = filtered + self.bass_filter.process(filtered) * self.bass_boost;
        let driven = saturate(boosted, self.drive);

        let echoed = driven + self.delay.process(driven, self.delay_feedback) * self.delay_mix;

        let (wet_l, wet_r) = self.reverb.process(echoed);
        (
            echoed + wet_l * self.reverb_mix,
            echoed + wet_r * self.reverb_mix,
        )
    }

    /// Process a mono block into a stereo pair. All three slices must be the
    /// same length.
    pub fn render(&mut self, dry: &[f32], left: &mut [f32], right: &mut [f32]) {
        for ((&x, l), r) in dry.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            (*l, *r) = self.process(x);
        }
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.bass_filter.reset();
        self.delay.reset();
        self.reverb.reset();
    }

    pub fn delay_samples(&self) -> usize {
        self.delay.delay_samples()
    }

    pub fn delay_feedback(&self) -> f32 {
        self.delay_feedback
    }

    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff()
    }

    pub fn resonance(&self) -> f32 {
        self.filter.resonance()
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[inline]
fn unit(value: f32) -> f32 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}
