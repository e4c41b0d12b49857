//! Benchmarks for the gated ADSR and the drum decay envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::dsp::envelope::{DecayEnvelope, Envelope};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut env = Envelope::adsr(SAMPLE_RATE, 2.0, 0.1, 0.7, 0.3);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = env.process(black_box(true));
                }
            })
        });

        let mut env = Envelope::adsr(SAMPLE_RATE, 0.001, 0.001, 0.7, 0.3);
        for _ in 0..200 {
            env.process(true);
        }
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = env.process(black_box(true));
                }
            })
        });

        let mut env = Envelope::adsr(SAMPLE_RATE, 0.001, 0.001, 0.7, 4.0);
        for _ in 0..200 {
            env.process(true);
        }
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                for s in buffer.iter_mut() {
                    *s = env.process(black_box(false));
                }
            })
        });

        let mut decay = DecayEnvelope::new();
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                decay.trigger(1.0, 0.3, SAMPLE_RATE);
                for s in buffer.iter_mut() {
                    *s = decay.next_sample();
                }
            })
        });
    }

    group.finish();
}
