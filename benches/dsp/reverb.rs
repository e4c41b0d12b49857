//! Benchmarks for the Schroeder reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::dsp::reverb::{SchroederReverb, StereoReverb};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| if i % 64 == 0 { 0.8 } else { 0.0 })
            .collect();
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        let mut mono = SchroederReverb::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("mono", size), &size, |b, _| {
            b.iter(|| {
                for (o, &x) in left.iter_mut().zip(&input) {
                    *o = mono.process(black_box(x));
                }
            })
        });

        let mut stereo = StereoReverb::new(SAMPLE_RATE);
        stereo.set_time(0.9);
        group.bench_with_input(BenchmarkId::new("stereo", size), &size, |b, _| {
            b.iter(|| {
                for ((l, r), &x) in left.iter_mut().zip(right.iter_mut()).zip(&input) {
                    (*l, *r) = stereo.process(black_box(x));
                }
            })
        });
    }

    group.finish();
}
