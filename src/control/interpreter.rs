use crate::{
    control::{
        cc,
        params::{InstrumentMode, ParameterSet},
    },
    drums::DrumEngine,
    io::midi::MidiEvent,
    looper::Looper,
    synth::{StealPolicy, VoicePool},
};

/// Everything a command may touch, borrowed for the duration of one apply.
pub struct Targets<'a, P: StealPolicy> {
    pub params: &'a mut ParameterSet,
    pub voices: &'a mut VoicePool<P>,
    pub drums: &'a mut DrumEngine,
    pub looper: &'a mut Looper,
}

/// Maps decoded commands onto engine state.
///
/// Stateless apart from its configuration; all the state it mutates lives in
/// the [`Targets`].
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    channel: u8,
    bend_range: f32,
}

impl Interpreter {
    pub fn new(channel: u8, bend_range: f32) -> Self {
        Self {
            channel: channel & 0x0F,
            bend_range,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Apply one command. Returns false if it was ignored (wrong channel or
    /// unknown controller).
    pub fn apply<P: StealPolicy>(&self, event: MidiEvent, t: Targets<'_, P>) -> bool {
        if event.channel() != self.channel {
            return false;
        }

        match event {
            MidiEvent::NoteOn { key, velocity: 0, .. } | MidiEvent::NoteOff { key, .. } => {
                // always the pool, so keys held across a mode switch still lift
                t.voices.note_off(key, t.params.sustain_pedal);
            }
            MidiEvent::NoteOn { key, velocity, .. } => match t.params.mode {
                InstrumentMode::DrumKit => {
                    t.drums.trigger(key, velocity);
                }
                InstrumentMode::PolySynth => {
                    t.voices.note_on(key, velocity, t.params.pitch_bend);
                }
            },
            MidiEvent::ControlChange { controller, value, .. } => {
                return self.control_change(controller, value, t);
            }
            MidiEvent::PitchBend { lsb, msb, .. } => {
                t.params.set_pitch_bend(lsb, msb, self.bend_range);
            }
        }

        true
    }

    fn control_change<P: StealPolicy>(&self, controller: u8, value: u8, t: Targets<'_, P>) -> bool {
        match controller {
            cc::SUSTAIN_PEDAL => {
                let held = value >= cc::SWITCH_ON;
                let was_held = std::mem::replace(&mut t.params.sustain_pedal, held);
                if was_held && !held {
                    t.voices.release_sustained();
                }
            }
            cc::INSTRUMENT_MODE => {
                let mode = InstrumentMode::from_cc(value);
                if t.params.mode == InstrumentMode::DrumKit && mode != InstrumentMode::DrumKit {
                    t.drums.clear();
                }
                t.params.mode = mode;
            }
            cc::LOOPER_CONTROL => t.looper.control(value),
            _ => {
                if !t.params.set_controller(controller, value) {
                    return false;
                }
                let p = &*t.params;
                match controller {
                    cc::ATTACK | cc::DECAY | cc::SUSTAIN | cc::RELEASE => {
                        t.voices.set_envelope(p.attack, p.decay, p.sustain, p.release)
                    }
                    cc::VIBRATO_RATE => t.voices.set_vibrato_rate(p.vibrato_rate),
                    _ => {}
                }
            }
        }

        true
    }
}
