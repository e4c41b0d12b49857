//! Benchmarks for the feedback delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::dsp::delay::DelayLine;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // shortest, typical, longest
    let delay_times: &[usize] = &[960, 16_800, 48_000];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut output = vec![0.0f32; size];

        for &delay in delay_times {
            let mut line = DelayLine::new(SAMPLE_RATE as usize + 1);
            line.set_delay(delay);
            let id = format!("{delay}samp");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    for (o, &x) in output.iter_mut().zip(&input) {
                        *o = line.process(black_box(x), black_box(0.5));
                    }
                })
            });
        }
    }

    group.finish();
}
