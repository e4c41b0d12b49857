//! Benchmarks for the melodic voice pool.
//!
//! Every voice recomputes both oscillator frequencies each sample, so cost
//! scales with the number of sounding voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::synth::{PitchMod, VoicePool};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let pitch = PitchMod {
        bend: 0.3,
        vibrato_depth: 0.25,
    };

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for sounding in [1usize, 3, 6] {
            let mut pool = VoicePool::new(SAMPLE_RATE, 6);
            for i in 0..sounding {
                pool.note_on(48 + 7 * i as u8, 100, 0.0);
            }
            let id = format!("{sounding}_of_6");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    buffer.fill(0.0);
                    pool.render(black_box(&mut buffer), black_box(pitch));
                })
            });
        }

        // Note churn: every block steals a voice
        let mut pool = VoicePool::new(SAMPLE_RATE, 6);
        let mut note = 36u8;
        group.bench_with_input(BenchmarkId::new("stealing", size), &size, |b, _| {
            b.iter(|| {
                note = if note >= 96 { 36 } else { note + 1 };
                pool.note_on(note, 100, 0.0);
                buffer.fill(0.0);
                pool.render(black_box(&mut buffer), black_box(pitch));
            })
        });
    }

    group.finish();
}
