//! Free-running stereo looper over the post-effects signal.
//!
//! One pass, no overdub. Recording fills the buffer from the start; filling it
//! completely finishes the take on its own.
//!
//! ```text
//!            record            record (len > 0)
//!   Empty ───────────► Recording ───────────► Playing ◄──┐
//!     ▲                  │  record (len == 0)   │  play   │ play
//!     └──────────────────┘                      ▼         │
//!                                             Stopped ────┘
//!   stop/clear from any state → Empty
//! ```

use crate::control::cc;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LooperState {
    #[default]
    Empty,
    Recording,
    Playing,
    Stopped,
}

/// What a looper-control value asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LooperCommand {
    StopClear,
    ToggleRecord,
    TogglePlayback,
}

impl LooperCommand {
    pub fn from_cc(value: u8) -> Self {
        if value < cc::LOOPER_STOP_BELOW {
            LooperCommand::StopClear
        } else if value < cc::LOOPER_PLAY_FROM {
            LooperCommand::ToggleRecord
        } else {
            LooperCommand::TogglePlayback
        }
    }
}

pub struct Looper {
    left: Vec<f32>,
    right: Vec<f32>,
    state: LooperState,
    write_pos: usize,
    play_pos: usize,
    length: usize,
}

impl Looper {
    /// `capacity` is in frames and never changes.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            left: vec![0.0; capacity],
            right: vec![0.0; capacity],
            state: LooperState::Empty,
            write_pos: 0,
            play_pos: 0,
            length: 0,
        }
    }

    pub fn control(&mut self, value: u8) {
        self.apply(LooperCommand::from_cc(value));
    }

    pub fn apply(&mut self, command: LooperCommand) {
        match command {
            LooperCommand::StopClear => self.stop_clear(),
            LooperCommand::ToggleRecord => self.toggle_record(),
            LooperCommand::TogglePlayback => self.toggle_playback(),
        }
    }

    /// Drop the take and go back to `Empty`. The buffer contents are left in
    /// place; `length == 0` makes them unreachable.
    pub fn stop_clear(&mut self) {
        self.state = LooperState::Empty;
        self.write_pos = 0;
        self.play_pos = 0;
        self.length = 0;
    }

    pub fn toggle_record(&mut self) {
        if self.state == LooperState::Recording {
            self.finish_recording();
        } else {
            self.state = LooperState::Recording;
            self.write_pos = 0;
            self.play_pos = 0;
            self.length = 0;
        }
    }

    fn finish_recording(&mut self) {
        self.length = self.write_pos;
        self.play_pos = 0;
        self.state = if self.length > 0 {
            LooperState::Playing
        } else {
            LooperState::Empty
        };
    }

    pub fn toggle_playback(&mut self) {
        if self.length == 0 {
            return;
        }
        match self.state {
            LooperState::Playing => self.state = LooperState::Stopped,
            _ => {
                self.state = LooperState::Playing;
                self.play_pos = 0;
            }
        }
    }

    /// Feed one post-effects frame and return it with any playback mixed in.
    #[inline]
    pub fn process(&mut self, left: f32, right: f32, level: f32) -> (f32, f32) {
        match self.state {
            LooperState::Recording => {
                self.left[self.write_pos] = left;
                self.right[self.write_pos] = right;
                self.write_pos += 1;
                if self.write_pos >= self.left.len() {
                    self.finish_recording();
                }
                (left, right)
            }
            LooperState::Playing => {
                let out = (
                    left + self.left[self.play_pos] * level,
                    right + self.right[self.play_pos] * level,
                );
                self.play_pos += 1;
                if self.play_pos >= self.length {
                    self.play_pos = 0;
                }
                out
            }
            LooperState::Empty | LooperState::Stopped => (left, right),
        }
    }

    /// In-place block version of [`Looper::process`].
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32], level: f32) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process(*l, *r, level);
        }
    }

    pub fn state(&self) -> LooperState {
        self.state
    }

    /// Recorded frames. Zero while a take is in progress.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn capacity(&self) -> usize {
        self.left.len()
    }

    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    pub fn play_position(&self) -> usize {
        self.play_pos
    }
}
