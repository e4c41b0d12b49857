//! Status bar: mode, pedal, looper, voices and levels

use groovebox_dsp::{control::InstrumentMode, looper::LooperState};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::StatusUpdate;

pub struct Levels {
    pub peak: f32,
    pub rms: f32,
}

impl Levels {
    pub fn measure(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    status: &StatusUpdate,
    octave: i8,
    sample_rate: f32,
    levels: &Levels,
) {
    let (mode, mode_color) = match status.mode {
        InstrumentMode::PolySynth => ("SYNTH", Color::Cyan),
        InstrumentMode::DrumKit => ("DRUMS", Color::LightRed),
    };

    let (looper, looper_color) = match status.looper {
        LooperState::Empty => ("loop --".to_string(), Color::DarkGray),
        LooperState::Recording => (
            format!("● REC max {:.1}s", status.loop_capacity as f32 / sample_rate),
            Color::Red,
        ),
        LooperState::Playing => (
            format!("▶ {:.2}s", status.loop_frames as f32 / sample_rate),
            Color::Green,
        ),
        LooperState::Stopped => (
            format!("■ {:.2}s", status.loop_frames as f32 / sample_rate),
            Color::Yellow,
        ),
    };

    let pedal = if status.sustain { "PED" } else { "ped" };

    let line = Line::from(vec![
        Span::styled(format!(" {mode}  "), Style::default().fg(mode_color)),
        Span::styled(format!("{pedal}  "), Style::default().fg(Color::White)),
        Span::styled(format!("{looper}  "), Style::default().fg(looper_color)),
        Span::styled(
            format!(
                "oct {octave:+}  voices {}  drums {}  ",
                status.voices_sounding, status.drums_active
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "cut {:.0}Hz  res {:.2}  vol {:.2}  bend {:+.2}  ",
                status.cutoff, status.resonance, status.master_gain, status.pitch_bend
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", levels.peak, levels.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph =
        Paragraph::new(line).block(Block::default().title(" groovebox ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
