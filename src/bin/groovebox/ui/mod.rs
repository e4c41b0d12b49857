//! Terminal front end: keyboard in, scope and status out.

pub mod state;
mod spectrum;
mod status;
mod waveform;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyEventKind};
use groovebox_dsp::{
    control::{cc, InstrumentMode},
    MidiEvent, MidiParser,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use crate::{
    audio::AudioHandle,
    keys::{self, Action},
};
use spectrum::Spectrum;
use state::StatusUpdate;
use status::{render_status, Levels};
use waveform::render_waveform;

const SCOPE_LEN: usize = 1024;

/// Terminals rarely report key release, so notes end on a timer. Key repeat
/// keeps a held key alive.
const NOTE_HOLD: Duration = Duration::from_millis(350);

const SYNTH_CHANNEL: u8 = cc::SYNTH_CHANNEL;

pub struct UiApp {
    audio: AudioHandle,
    parser: MidiParser,
    scope: Vec<f32>,
    spectrum: Spectrum,
    status: StatusUpdate,
    /// Notes sounding and when they should be released.
    held: Vec<(u8, Instant)>,
    octave: i8,
    pedal: bool,
    /// Last value sent per controller, for the nudge keys.
    controls: [u8; 128],
    should_quit: bool,
}

impl UiApp {
    pub fn new(audio: AudioHandle) -> Self {
        let spectrum = Spectrum::new(SCOPE_LEN, audio.sample_rate);
        Self {
            audio,
            parser: MidiParser::new(),
            scope: vec![0.0; SCOPE_LEN],
            spectrum,
            status: StatusUpdate::default(),
            held: Vec::with_capacity(16),
            octave: 0,
            pedal: false,
            controls: power_on_controls(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.release_expired(Instant::now());

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        let drums = self.status.mode == InstrumentMode::DrumKit;
                        if let Some(action) = keys::map(key.code, drums) {
                            self.handle(action);
                        }
                    }
                }
            }
        }

        // don't leave notes hanging on the way out
        let notes: Vec<u8> = self.held.drain(..).map(|(n, _)| n).collect();
        for note in notes {
            self.note_off(note);
        }
        Ok(())
    }

    fn poll_audio(&mut self) {
        let fresh = self.audio.scope_rx.slots();
        if fresh > 0 {
            let keep = fresh.min(SCOPE_LEN);
            let skip = fresh - keep;
            for _ in 0..skip {
                let _ = self.audio.scope_rx.pop();
            }
            self.scope.rotate_left(keep);
            let tail = SCOPE_LEN - keep;
            for slot in &mut self.scope[tail..] {
                *slot = self.audio.scope_rx.pop().unwrap_or(0.0);
            }
            self.spectrum.update(&self.scope);
        }

        while let Ok(update) = self.audio.status_rx.pop() {
            self.status = update;
        }
    }

    fn send(&mut self, event: MidiEvent) {
        // the frame goes out as raw bytes, the same path a serial link takes
        if let Err(err) = self
            .audio
            .commands
            .send_bytes(&mut self.parser, &event.encode())
        {
            log::warn!("{err}");
        }
    }

    fn note_on(&mut self, note: u8) {
        let now = Instant::now();
        if let Some(entry) = self.held.iter_mut().find(|(n, _)| *n == note) {
            entry.1 = now + NOTE_HOLD;
            return;
        }
        self.held.push((note, now + NOTE_HOLD));
        self.send(MidiEvent::NoteOn {
            channel: SYNTH_CHANNEL,
            key: note,
            velocity: 100,
        });
    }

    fn note_off(&mut self, note: u8) {
        self.send(MidiEvent::NoteOff {
            channel: SYNTH_CHANNEL,
            key: note,
            velocity: 0,
        });
    }

    fn release_expired(&mut self, now: Instant) {
        let mut i = 0;
        while i < self.held.len() {
            if self.held[i].1 <= now {
                let (note, _) = self.held.swap_remove(i);
                self.note_off(note);
            } else {
                i += 1;
            }
        }
    }

    fn control(&mut self, controller: u8, value: u8) {
        self.controls[usize::from(controller & 0x7F)] = value;
        self.send(MidiEvent::ControlChange {
            channel: SYNTH_CHANNEL,
            controller,
            value,
        });
    }

    fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Note(offset) => {
                let root = 60 + 12 * i16::from(self.octave);
                let note = (root + i16::from(offset)).clamp(0, 127) as u8;
                self.note_on(note);
            }
            Action::Drum(note) => self.note_on(note),
            Action::OctaveDown => self.octave = (self.octave - 1).max(-4),
            Action::OctaveUp => self.octave = (self.octave + 1).min(4),
            Action::ToggleMode => {
                let value = match self.status.mode {
                    InstrumentMode::PolySynth => 127,
                    InstrumentMode::DrumKit => 0,
                };
                self.control(cc::INSTRUMENT_MODE, value);
            }
            Action::TogglePedal => {
                self.pedal = !self.pedal;
                self.control(cc::SUSTAIN_PEDAL, if self.pedal { 127 } else { 0 });
            }
            Action::Nudge(controller, step) => {
                let current = i16::from(self.controls[usize::from(controller & 0x7F)]);
                let value = (current + step).clamp(0, 127) as u8;
                self.control(controller, value);
            }
            Action::Looper(value) => self.control(cc::LOOPER_CONTROL, value),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let levels = Levels::measure(&self.scope);
        render_status(
            frame,
            rows[0],
            &self.status,
            self.octave,
            self.audio.sample_rate,
            &levels,
        );

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        render_waveform(frame, panes[0], &self.scope);
        self.spectrum.render(frame, panes[1]);

        let help = Paragraph::new(keys::HELP).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}

/// Controller positions matching the engine's power-on parameters, so the
/// first nudge moves from where the sound already is.
fn power_on_controls() -> [u8; 128] {
    let mut controls = [0u8; 128];
    controls[usize::from(cc::VOLUME)] = 69;
    controls[usize::from(cc::CUTOFF)] = 110;
    controls[usize::from(cc::RESONANCE)] = 21;
    controls
}
