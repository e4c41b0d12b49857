//! Benchmarks for the drive stage and output clip.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::dsp::distortion::{hard_clip, saturate};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 1.5).collect();
        let mut buffer = vec![0.0f32; size];

        for drive in [0.0f32, 0.5, 1.0] {
            let id = format!("tanh_{drive}");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    for (o, &x) in buffer.iter_mut().zip(&input) {
                        *o = saturate(black_box(x), black_box(drive));
                    }
                })
            });
        }

        group.bench_with_input(BenchmarkId::new("hard_clip", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in buffer.iter_mut().zip(&input) {
                    *o = hard_clip(black_box(x), 1.0);
                }
            })
        });
    }

    group.finish();
}
