//! Computer keyboard as a control surface.
//!
//! Two rows play a chromatic octave, like a piano laid flat:
//!
//! ```text
//!  w e   t y u   o p
//! a s d f g h j k l ;
//! ```
//!
//! In drum mode the home row plays the kit instead.

use crossterm::event::KeyCode;
use groovebox_dsp::control::cc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Semitone offset from the octave root.
    Note(u8),
    /// A fixed drum note.
    Drum(u8),
    OctaveDown,
    OctaveUp,
    ToggleMode,
    TogglePedal,
    /// Step a controller by the given amount.
    Nudge(u8, i16),
    Looper(u8),
}

/// GM notes for the home row in drum mode.
const DRUM_ROW: [u8; 10] = [36, 38, 42, 46, 41, 48, 39, 56, 37, 75];

const STEP: i16 = 8;

pub fn map(code: KeyCode, drum_mode: bool) -> Option<Action> {
    let KeyCode::Char(c) = code else {
        return match code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab => Some(Action::ToggleMode),
            _ => None,
        };
    };

    if drum_mode {
        if let Some(i) = "asdfghjkl;".find(c) {
            return Some(Action::Drum(DRUM_ROW[i]));
        }
    }

    let action = match c {
        'q' => Action::Quit,
        'a' => Action::Note(0),
        'w' => Action::Note(1),
        's' => Action::Note(2),
        'e' => Action::Note(3),
        'd' => Action::Note(4),
        'f' => Action::Note(5),
        't' => Action::Note(6),
        'g' => Action::Note(7),
        'y' => Action::Note(8),
        'h' => Action::Note(9),
        'u' => Action::Note(10),
        'j' => Action::Note(11),
        'k' => Action::Note(12),
        'o' => Action::Note(13),
        'l' => Action::Note(14),
        'p' => Action::Note(15),
        ';' => Action::Note(16),
        'z' => Action::OctaveDown,
        'x' => Action::OctaveUp,
        ' ' => Action::TogglePedal,
        '1' => Action::Nudge(cc::CUTOFF, -STEP),
        '2' => Action::Nudge(cc::CUTOFF, STEP),
        '3' => Action::Nudge(cc::RESONANCE, -STEP),
        '4' => Action::Nudge(cc::RESONANCE, STEP),
        '5' => Action::Nudge(cc::DELAY_MIX, -STEP),
        '6' => Action::Nudge(cc::DELAY_MIX, STEP),
        '7' => Action::Nudge(cc::REVERB_MIX, -STEP),
        '8' => Action::Nudge(cc::REVERB_MIX, STEP),
        '9' => Action::Nudge(cc::DRIVE, -STEP),
        '0' => Action::Nudge(cc::DRIVE, STEP),
        '-' => Action::Nudge(cc::VOLUME, -STEP),
        '=' => Action::Nudge(cc::VOLUME, STEP),
        'r' => Action::Looper(cc::LOOPER_RECORD_VALUE),
        'v' => Action::Looper(cc::LOOPER_PLAY_VALUE),
        'c' => Action::Looper(cc::LOOPER_STOP_VALUE),
        _ => return None,
    };
    Some(action)
}

pub const HELP: &str = " [a-;] play  [z/x] octave  [Tab] drums  [Space] pedal  \
[1-0] cut/res/dly/rev/drv  [-/=] vol  [r] rec  [v] play  [c] clear  [q] quit";
