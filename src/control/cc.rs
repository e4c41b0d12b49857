//! The controller table shared with the control surface.
//!
//! This is the one definition of channel and controller numbers. The
//! surface firmware carries the same table; bump `PROTOCOL_VERSION` whenever
//! a number is added or moved so both sides can check they agree.

/// v1.2, encoded as 0xMMMM_mmmm.
pub const PROTOCOL_VERSION: u32 = 0x0001_0002;

/// Wire channel (status low nibble) for synth notes and controllers.
/// Users see this as "MIDI channel 1".
pub const SYNTH_CHANNEL: u8 = 0;

pub const MODWHEEL: u8 = 1;
pub const VOLUME: u8 = 7;
pub const SUSTAIN_PEDAL: u8 = 64;
pub const CUTOFF: u8 = 70;
pub const RESONANCE: u8 = 71;
pub const ATTACK: u8 = 72;
pub const DECAY: u8 = 73;
pub const SUSTAIN: u8 = 74;
pub const RELEASE: u8 = 75;
pub const VIBRATO_RATE: u8 = 76;
pub const DELAY_TIME: u8 = 77;
pub const DELAY_FEEDBACK: u8 = 78;
pub const DELAY_MIX: u8 = 79;
pub const REVERB_MIX: u8 = 80;
pub const REVERB_TIME: u8 = 81;
pub const BASS_BOOST: u8 = 84;
pub const DRIVE: u8 = 85;
pub const INSTRUMENT_MODE: u8 = 90;
pub const LOOPER_CONTROL: u8 = 91;
pub const LOOPER_LEVEL: u8 = 92;

/// Looper control bands: `< STOP_BELOW` clears, `>= PLAY_FROM` toggles
/// playback, anything between toggles recording.
pub const LOOPER_STOP_BELOW: u8 = 20;
pub const LOOPER_PLAY_FROM: u8 = 80;

/// Values the surface sends for each looper button.
pub const LOOPER_STOP_VALUE: u8 = 0;
pub const LOOPER_RECORD_VALUE: u8 = 40;
pub const LOOPER_PLAY_VALUE: u8 = 100;

/// Switches (pedal, mode) read as on at or above this value.
pub const SWITCH_ON: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CcDefinition {
    pub number: u8,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CC_TABLE: &[CcDefinition] = &[
    CcDefinition { number: MODWHEEL, name: "Mod", description: "Mod wheel / joystick Y" },
    CcDefinition { number: VOLUME, name: "Vol", description: "Master volume" },
    CcDefinition { number: SUSTAIN_PEDAL, name: "Sus", description: "Sustain pedal" },
    CcDefinition { number: CUTOFF, name: "Cut", description: "Filter cutoff" },
    CcDefinition { number: RESONANCE, name: "Res", description: "Filter resonance" },
    CcDefinition { number: ATTACK, name: "Atk", description: "Envelope attack" },
    CcDefinition { number: DECAY, name: "Dec", description: "Envelope decay" },
    CcDefinition { number: SUSTAIN, name: "SusLvl", description: "Envelope sustain" },
    CcDefinition { number: RELEASE, name: "Rel", description: "Envelope release" },
    CcDefinition { number: VIBRATO_RATE, name: "Vib", description: "Vibrato rate" },
    CcDefinition { number: DELAY_TIME, name: "DlyT", description: "Delay time" },
    CcDefinition { number: DELAY_FEEDBACK, name: "DlyF", description: "Delay feedback" },
    CcDefinition { number: DELAY_MIX, name: "DlyM", description: "Delay mix" },
    CcDefinition { number: REVERB_MIX, name: "RevM", description: "Reverb mix" },
    CcDefinition { number: REVERB_TIME, name: "RevT", description: "Reverb time" },
    CcDefinition { number: BASS_BOOST, name: "Bass", description: "Bass boost" },
    CcDefinition { number: DRIVE, name: "Drv", description: "Drive" },
    CcDefinition { number: INSTRUMENT_MODE, name: "Mode", description: "Instrument mode" },
    CcDefinition { number: LOOPER_CONTROL, name: "LoopCtl", description: "Looper transport" },
    CcDefinition { number: LOOPER_LEVEL, name: "LoopLvl", description: "Looper playback level" },
];

pub fn find(number: u8) -> Option<&'static CcDefinition> {
    CC_TABLE.iter().find(|def| def.number == number)
}
