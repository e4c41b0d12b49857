//! Status snapshot sent from the audio callback to the UI.
//!
//! Copy and fixed-size, so pushing one never allocates.

use groovebox_dsp::{control::InstrumentMode, looper::LooperState, Groovebox};

#[derive(Clone, Copy, Debug)]
pub struct StatusUpdate {
    pub mode: InstrumentMode,
    pub looper: LooperState,
    pub loop_frames: usize,
    pub loop_capacity: usize,
    pub sustain: bool,
    pub voices_sounding: usize,
    pub drums_active: usize,
    pub cutoff: f32,
    pub resonance: f32,
    pub master_gain: f32,
    pub pitch_bend: f32,
}

impl StatusUpdate {
    pub fn capture(engine: &Groovebox) -> Self {
        let p = engine.params();
        Self {
            mode: p.mode,
            looper: engine.looper().state(),
            loop_frames: engine.looper().len(),
            loop_capacity: engine.looper().capacity(),
            sustain: p.sustain_pedal,
            voices_sounding: engine.voices().sounding_count(),
            drums_active: engine.drums().active_count(),
            cutoff: p.cutoff,
            resonance: p.resonance,
            master_gain: p.master_gain,
            pitch_bend: p.pitch_bend,
        }
    }
}

impl Default for StatusUpdate {
    fn default() -> Self {
        Self {
            mode: InstrumentMode::PolySynth,
            looper: LooperState::Empty,
            loop_frames: 0,
            loop_capacity: 0,
            sustain: false,
            voices_sounding: 0,
            drums_active: 0,
            cutoff: 0.0,
            resonance: 0.0,
            master_gain: 0.0,
            pitch_bend: 0.0,
        }
    }
}
