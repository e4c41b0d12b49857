//! Benchmarks for the effects chain and complete engine blocks.
//!
//! `engine/*` is the number that has to fit the deadline: command drain,
//! voices, effects, looper and clip together.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use groovebox_dsp::{
    channel,
    control::{cc, ParameterSet},
    effects::EffectsChain,
    EngineConfig, MidiEvent,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn cc_event(controller: u8, value: u8) -> MidiEvent {
    MidiEvent::ControlChange {
        channel: 0,
        controller,
        value,
    }
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.03).sin() * 0.5).collect();
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        let mut fx = EffectsChain::new(SAMPLE_RATE);
        fx.configure(&ParameterSet {
            delay_mix: 0.4,
            reverb_mix: 0.4,
            bass_boost: 0.5,
            drive: 0.3,
            ..ParameterSet::default()
        });
        group.bench_with_input(BenchmarkId::new("effects", size), &size, |b, _| {
            b.iter(|| fx.render(black_box(&input), &mut left, &mut right))
        });

        let (_tx, mut idle) = channel(EngineConfig::default());
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| idle.render_block(black_box(&mut left), black_box(&mut right)))
        });

        // Six held notes, every effect wet, looper playing back
        let (mut tx, mut busy) = channel(EngineConfig::default());
        for (controller, value) in [
            (cc::DELAY_MIX, 60),
            (cc::REVERB_MIX, 60),
            (cc::DRIVE, 40),
            (cc::BASS_BOOST, 64),
            (cc::MODWHEEL, 100),
            (cc::LOOPER_CONTROL, cc::LOOPER_RECORD_VALUE),
        ] {
            let _ = tx.send(cc_event(controller, value));
        }
        for key in [48, 52, 55, 59, 62, 65] {
            let _ = tx.send(MidiEvent::NoteOn {
                channel: 0,
                key,
                velocity: 100,
            });
        }
        busy.render_block(&mut left, &mut right);
        let _ = tx.send(cc_event(cc::LOOPER_CONTROL, cc::LOOPER_RECORD_VALUE));

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| busy.render_block(black_box(&mut left), black_box(&mut right)))
        });
    }

    group.finish();
}
