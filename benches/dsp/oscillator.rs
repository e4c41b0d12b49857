//! Benchmarks for the oscillators and noise source.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::dsp::oscillator::{midi_to_hz, NoiseSource, Oscillator};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let variants = [
            ("sine", Oscillator::sine(SAMPLE_RATE)),
            ("saw", Oscillator::saw(SAMPLE_RATE)),
            ("triangle", Oscillator::triangle(SAMPLE_RATE)),
        ];
        for (name, mut osc) in variants {
            osc.set_freq(440.0);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for s in buffer.iter_mut() {
                        *s = osc.next_sample();
                    }
                })
            });
        }

        // Frequency recomputed every sample, the way voices run under vibrato
        let mut osc = Oscillator::saw(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("saw_retuned", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    osc.set_freq(midi_to_hz(black_box(60.0 + (i % 8) as f32 * 0.01)));
                    *s = osc.next_sample();
                }
            })
        });

        let mut noise = NoiseSource::default();
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = noise.next_sample();
                }
            })
        });
    }

    group.finish();
}
