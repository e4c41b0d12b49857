//! Stereo Schroeder reverb.
//!
//! ```text
//! Input ──┬──→ [Comb 1] ──┐
//!         ├──→ [Comb 2] ──┤
//!         ├──→ [Comb 3] ──┼──→ (+) ──→ [Allpass 1] ──→ [Allpass 2] ──→ tail
//!         └──→ [Comb 4] ──┘
//! ```
//!
//! Each channel runs its own bank. The right bank's delay lengths are offset by
//! a fixed spread so the two tails decorrelate; this is where the otherwise
//! mono engine becomes stereo.
//!
//! Comb feedback is the decay control: `0.2 + 0.75 * time`, capped at 0.95 so
//! the tail always dies out. Damping is a one-pole low-pass inside each comb
//! loop that darkens successive reflections.

/// Comb delays in ms, mutually prime-ish to avoid stacked resonances.
const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];
/// Right-channel offset in samples at 44.1 kHz, scaled to the running rate.
const STEREO_SPREAD: f32 = 23.0;

pub const MAX_FEEDBACK: f32 = 0.95;
const DEFAULT_DAMPING: f32 = 0.3;
const ALLPASS_FEEDBACK: f32 = 0.5;

fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate / 1000.0) as usize).max(1)
}

/// Comb filter with damped feedback; buffer sized once at construction.
pub struct CombFilter {
    buffer: Box<[f32]>,
    write_pos: usize,
    feedback: f32,
    damp: f32,
    filter_state: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)].into_boxed_slice(),
            write_pos: 0,
            feedback: 0.5,
            damp: DEFAULT_DAMPING,
            filter_state: 0.0,
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.buffer[self.write_pos];

        self.filter_state = output * (1.0 - self.damp) + self.filter_state * self.damp;
        self.buffer[self.write_pos] = input + self.filter_state * self.feedback;

        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }

        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.filter_state = 0.0;
        self.write_pos = 0;
    }
}

/// Allpass diffuser; buffer sized once at construction.
pub struct AllpassFilter {
    buffer: Box<[f32]>,
    write_pos: usize,
    feedback: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)].into_boxed_slice(),
            write_pos: 0,
            feedback: ALLPASS_FEEDBACK,
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        let output = -self.feedback * input + delayed;

        self.buffer[self.write_pos] = input + self.feedback * output;

        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }

        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// One channel: four parallel combs into two series allpasses.
pub struct SchroederReverb {
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
}

impl SchroederReverb {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_offset(sample_rate, 0)
    }

    /// Build a bank whose delay lines are all `offset` samples longer.
    pub fn with_offset(sample_rate: f32, offset: usize) -> Self {
        let comb = |ms: f32| CombFilter::new(ms_to_samples(ms, sample_rate) + offset);
        let allpass = |ms: f32| AllpassFilter::new(ms_to_samples(ms, sample_rate) + offset);

        Self {
            combs: COMB_DELAYS_MS.map(comb),
            allpasses: ALLPASS_DELAYS_MS.map(allpass),
        }
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        for comb in &mut self.combs {
            comb.set_feedback(feedback);
        }
    }

    pub fn set_damping(&mut self, damp: f32) {
        for comb in &mut self.combs {
            comb.set_damp(damp);
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input);
        }
        output *= 0.25;

        for allpass in &mut self.allpasses {
            output = allpass.process(output);
        }

        output
    }

    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
        for allpass in &mut self.allpasses {
            allpass.reset();
        }
    }
}

/// Two decorrelated banks fed from the same mono input.
pub struct StereoReverb {
    left: SchroederReverb,
    right: SchroederReverb,
}

impl StereoReverb {
    pub fn new(sample_rate: f32) -> Self {
        let spread = (STEREO_SPREAD * sample_rate / 44_100.0).round() as usize;
        let mut reverb = Self {
            left: SchroederReverb::new(sample_rate),
            right: SchroederReverb::with_offset(sample_rate, spread.max(1)),
        };
        reverb.set_time(0.5);
        reverb
    }

    /// Map a 0..1 time control onto comb feedback.
    pub fn set_time(&mut self, time: f32) {
        let feedback = decay_feedback(time);
        self.left.set_feedback(feedback);
        self.right.set_feedback(feedback);
    }

    pub fn set_damping(&mut self, damp: f32) {
        self.left.set_damping(damp);
        self.right.set_damping(damp);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> (f32, f32) {
        (self.left.process(input), self.right.process(input))
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}

/// Comb feedback for a 0..1 reverb time.
pub fn decay_feedback(time: f32) -> f32 {
    let time = if time.is_finite() { time.clamp(0.0, 1.0) } else { 0.0 };
    (0.2 + 0.75 * time).min(MAX_FEEDBACK)
}
