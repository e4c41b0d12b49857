use crate::{
    dsp::{
        envelope::{Envelope, EnvelopeState},
        oscillator::{midi_to_hz, Oscillator},
    },
    SILENCE_THRESHOLD,
};

/// Second oscillator sits this far above the first.
pub const DETUNE_SEMITONES: f32 = 0.08;
const OSC_AMPLITUDE: f32 = 0.6;

/// One melodic voice: saw + detuned triangle through a gated ADSR.
///
/// Three flags track its lifecycle:
/// - `key_down`: the physical key is still held
/// - `gate`: the envelope should be sounding (stays high under the pedal)
/// - `active`: the envelope is still audible
///
/// A voice is idle when all three are false.
pub struct Voice {
    note: u8,
    velocity: f32,
    key_down: bool,
    gate: bool,
    active: bool,
    osc1: Oscillator,
    osc2: Oscillator,
    env: Envelope,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            note: 60,
            velocity: 0.0,
            key_down: false,
            gate: false,
            active: false,
            osc1: Oscillator::saw(sample_rate).with_amplitude(OSC_AMPLITUDE),
            osc2: Oscillator::triangle(sample_rate).with_amplitude(OSC_AMPLITUDE),
            env: Envelope::new(sample_rate),
        }
    }

    /// Bind the voice to `note` and open the gate.
    ///
    /// The envelope restarts its attack from wherever it is, so a retrigger
    /// or a steal does not jump the output.
    pub fn start(&mut self, note: u8, velocity: f32, bend: f32) {
        self.note = note;
        self.velocity = velocity.clamp(0.0, 1.0);
        self.key_down = true;
        self.gate = true;
        self.active = true;
        self.tune(bend);
        self.env.retrigger();
    }

    /// Drop every flag so the slot can be reassigned.
    pub fn steal(&mut self) {
        self.active = false;
        self.gate = false;
        self.key_down = false;
        self.velocity = 0.0;
    }

    /// The key was lifted. The gate follows unless the pedal holds it.
    pub fn key_up(&mut self, sustain_held: bool) {
        self.key_down = false;
        if !sustain_held {
            self.gate = false;
        }
    }

    /// Pedal lifted: a voice held only by the pedal starts its release.
    pub fn release_sustained(&mut self) {
        if !self.key_down && self.gate {
            self.gate = false;
        }
    }

    #[inline]
    fn tune(&mut self, bend: f32) {
        let pitch = f32::from(self.note) + bend;
        self.osc1.set_freq(midi_to_hz(pitch));
        self.osc2.set_freq(midi_to_hz(pitch + DETUNE_SEMITONES));
    }

    /// Render one sample with `bend` semitones of pitch offset.
    #[inline]
    pub fn next_sample(&mut self, bend: f32) -> f32 {
        if self.is_idle() {
            return 0.0;
        }

        let level = self.env.process(self.gate);

        if !self.gate && !self.key_down && level < SILENCE_THRESHOLD {
            self.active = false;
            return 0.0;
        }

        self.tune(bend);
        let sig = (self.osc1.next_sample() + self.osc2.next_sample()) * 0.5;
        sig * level * self.velocity
    }

    pub fn set_envelope(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.env.set_adsr(attack, decay, sustain, release);
    }

    /// Nothing held, nothing sounding; skipped entirely by the render loop.
    pub fn is_idle(&self) -> bool {
        !self.active && !self.key_down && !self.gate
    }

    /// Free for allocation without stealing.
    pub fn is_free(&self) -> bool {
        !self.active && !self.key_down
    }

    /// Counts toward polyphony and matches retriggers of the same note.
    pub fn is_sounding(&self) -> bool {
        self.active || self.key_down
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn key_down(&self) -> bool {
        self.key_down
    }

    pub fn gate(&self) -> bool {
        self.gate
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Frequency of the main oscillator as of the last rendered sample.
    pub fn frequency(&self) -> f32 {
        self.osc1.freq()
    }

    pub fn envelope_level(&self) -> f32 {
        self.env.level()
    }

    pub fn envelope_state(&self) -> EnvelopeState {
        self.env.state()
    }
}
