//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::dsp::filter::SVFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let variants = [
            ("lowpass", SVFilter::lowpass(SAMPLE_RATE, 1_000.0)),
            ("highpass", SVFilter::highpass(SAMPLE_RATE, 1_000.0)),
            ("bandpass", SVFilter::bandpass(SAMPLE_RATE, 1_000.0)),
        ];

        for (name, mut filter) in variants {
            filter.set_resonance(0.5);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer));
                })
            });
        }

        // Cutoff moving every sample, as a CC sweep would
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 1_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    filter.set_cutoff(200.0 + i as f32 * 10.0);
                    *s = filter.process(black_box(input[i]));
                }
            })
        });
    }

    group.finish();
}
