//! Benchmarks for the drum kit.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::drums::DrumEngine;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// Kick, snare, both hats, toms, clap, cowbell: every slot busy.
const FULL_KIT: [u8; 8] = [36, 38, 42, 46, 41, 48, 39, 56];

pub fn bench_drums(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/drums");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut kit = DrumEngine::new(SAMPLE_RATE, 8);
        group.bench_with_input(BenchmarkId::new("kick", size), &size, |b, _| {
            b.iter(|| {
                kit.trigger(36, 127);
                buffer.fill(0.0);
                kit.render(black_box(&mut buffer));
            })
        });

        let mut kit = DrumEngine::new(SAMPLE_RATE, 8);
        group.bench_with_input(BenchmarkId::new("full_kit", size), &size, |b, _| {
            b.iter(|| {
                kit.clear();
                for note in FULL_KIT {
                    kit.trigger(note, 110);
                }
                buffer.fill(0.0);
                kit.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
