//! Log-frequency spectrum of the scope window.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

const BINS: usize = 64;
const FLOOR_DB: f64 = -100.0;

pub struct Spectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT index sampled for each display point.
    taps: Vec<usize>,
    /// (log10 Hz, dB) per display point.
    points: Vec<(f64, f64)>,
}

impl Spectrum {
    pub fn new(len: usize, sample_rate: f32) -> Self {
        let len = len.max(4);
        let fft = FftPlanner::new().plan_fft_forward(len);

        let denom = (len - 1) as f32;
        let window = (0..len)
            .map(|i| 0.5 - 0.5 * (std::f32::consts::TAU * i as f32 / denom).cos())
            .collect();

        let nyquist = f64::from(sample_rate / 2.0).clamp(40.0, 20_000.0);
        let (lo, hi) = (20f64.log10(), nyquist.log10());
        let half = len / 2;

        let mut taps = Vec::with_capacity(BINS);
        let mut points = Vec::with_capacity(BINS);
        for i in 0..BINS {
            let log_hz = lo + (hi - lo) * i as f64 / (BINS - 1) as f64;
            let hz = 10f64.powf(log_hz);
            let idx = (hz * len as f64 / f64::from(sample_rate)).round() as usize;
            taps.push(idx.clamp(1, half - 1));
            points.push((log_hz, FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); len],
            taps,
            points,
        }
    }

    /// Recompute from a window of the planned length; other lengths are ignored.
    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((bin, &s), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *bin = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (point, &idx) in self.points.iter_mut().zip(&self.taps) {
            let power = f64::from(self.scratch[idx].norm_sqr()).max(1e-12);
            point.1 = (10.0 * power.log10()).max(FLOOR_DB);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (lo, hi) = match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => (a.0, b.0),
            _ => (0.0, 1.0),
        };

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&self.points);

        let chart = Chart::new(vec![dataset])
            .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .bounds([lo, hi])
                    .labels(vec!["20", "200", "2k", "20k"])
                    .style(Style::default().fg(Color::DarkGray)),
            )
            .y_axis(
                Axis::default()
                    .bounds([FLOOR_DB, 40.0])
                    .labels(vec!["-100", "-30", "40"])
                    .style(Style::default().fg(Color::DarkGray)),
            );

        frame.render_widget(chart, area);
    }
}
