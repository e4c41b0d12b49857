use groovebox_dsp::{
    channel,
    control::{cc, InstrumentMode},
    io::MidiEvent,
    CommandSender, EngineConfig, Groovebox, SILENCE_THRESHOLD,
};

const BLOCK: usize = 48;

struct Rig {
    tx: CommandSender,
    engine: Groovebox,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl Rig {
    fn new(config: EngineConfig) -> Self {
        let (tx, engine) = channel(config);
        Self {
            tx,
            engine,
            left: vec![0.0; BLOCK],
            right: vec![0.0; BLOCK],
        }
    }

    fn send(&mut self, event: MidiEvent) {
        self.tx.send(event).unwrap();
    }

    fn cc(&mut self, controller: u8, value: u8) {
        self.send(MidiEvent::ControlChange { channel: 0, controller, value });
    }

    /// Render one block and return its energy (sum of squares, both sides).
    fn block(&mut self) -> f32 {
        self.engine.render_block(&mut self.left, &mut self.right);
        self.left
            .iter()
            .chain(&self.right)
            .map(|s| s * s)
            .sum()
    }

    fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(&self.right)
            .fold(0.0f32, |m, s| m.max(s.abs()))
    }
}

#[test]
fn note_on_then_off_decays_to_silence_within_release() {
    let mut rig = Rig::new(EngineConfig::default());
    assert_eq!(rig.engine.params().mode, InstrumentMode::PolySynth);

    rig.send(MidiEvent::NoteOn { channel: 0, key: 60, velocity: 100 });
    let held = rig.block();
    assert!(held > 0.0, "held block should carry energy");

    rig.send(MidiEvent::NoteOff { channel: 0, key: 60, velocity: 0 });

    let release = rig.engine.params().release;
    let sr = rig.engine.config().sample_rate;
    let release_blocks = (release * sr / BLOCK as f32).ceil() as usize;

    let voice_level = |engine: &Groovebox| {
        engine
            .voices()
            .voices()
            .iter()
            .find(|v| v.note() == 60)
            .map(|v| v.envelope_level())
            .unwrap_or(0.0)
    };

    let mut last = voice_level(&rig.engine);
    for _ in 0..release_blocks {
        rig.block();
        let level = voice_level(&rig.engine);
        assert!(level <= last, "envelope rose during release: {last} -> {level}");
        last = level;
    }

    assert_eq!(rig.engine.voices().sounding_count(), 0);
    rig.block();
    rig.block();
    assert!(rig.peak() < SILENCE_THRESHOLD, "tail peak {}", rig.peak());
}

#[test]
fn sustain_pedal_holds_released_keys() {
    let mut rig = Rig::new(EngineConfig::default());

    rig.cc(cc::SUSTAIN_PEDAL, 127);
    rig.send(MidiEvent::NoteOn { channel: 0, key: 64, velocity: 100 });
    rig.send(MidiEvent::NoteOff { channel: 0, key: 64, velocity: 0 });
    rig.block();

    let voice = |engine: &Groovebox| {
        engine
            .voices()
            .voices()
            .iter()
            .find(|v| v.note() == 64)
            .map(|v| (v.key_down(), v.gate()))
    };
    assert_eq!(voice(&rig.engine), Some((false, true)));

    for _ in 0..100 {
        rig.block();
    }
    assert_eq!(voice(&rig.engine), Some((false, true)), "pedal keeps the gate up");

    rig.cc(cc::SUSTAIN_PEDAL, 0);
    rig.block();
    assert_eq!(voice(&rig.engine), Some((false, false)));
}

#[test]
fn delay_clamps_reach_the_effects_chain() {
    let mut rig = Rig::new(EngineConfig::default());
    rig.cc(cc::DELAY_FEEDBACK, 127);
    rig.cc(cc::DELAY_TIME, 0);
    rig.block();

    let sr = rig.engine.config().sample_rate;
    assert!(rig.engine.params().delay_feedback <= 0.95);
    assert!(rig.engine.effects().delay_feedback() <= 0.95);
    assert!(rig.engine.effects().delay_samples() as f32 >= 0.02 * sr);
}

#[test]
fn pitch_bend_deadzone_and_extremes() {
    let mut rig = Rig::new(EngineConfig::default());

    for offset in [-255i32, -1, 0, 1, 100, 255] {
        rig.send(MidiEvent::pitch_bend(0, (8192 + offset) as u16));
        rig.block();
        assert_eq!(rig.engine.params().pitch_bend, 0.0, "offset {offset}");
    }

    rig.send(MidiEvent::pitch_bend(0, 16_383));
    rig.block();
    assert_eq!(rig.engine.params().pitch_bend, 2.0);

    rig.send(MidiEvent::pitch_bend(0, 0));
    rig.block();
    assert_eq!(rig.engine.params().pitch_bend, -2.0);
}

#[test]
fn other_channels_never_sound() {
    let mut rig = Rig::new(EngineConfig::default());
    for channel in 1..16 {
        rig.send(MidiEvent::NoteOn { channel, key: 60, velocity: 127 });
    }
    for _ in 0..10 {
        assert_eq!(rig.block(), 0.0);
    }
    assert_eq!(rig.engine.voices().sounding_count(), 0);
}

#[test]
fn commands_apply_in_arrival_order() {
    let mut rig = Rig::new(EngineConfig::default());
    rig.cc(cc::VOLUME, 0);
    rig.cc(cc::VOLUME, 127);
    rig.cc(cc::INSTRUMENT_MODE, 127);
    rig.cc(cc::INSTRUMENT_MODE, 0);
    rig.block();

    assert_eq!(rig.engine.params().master_gain, 1.0);
    assert_eq!(rig.engine.params().mode, InstrumentMode::PolySynth);
}

#[test]
fn raw_frames_reach_the_engine() {
    let mut rig = Rig::new(EngineConfig::default());
    rig.tx.send_frame(&[0x90, 62, 90]).unwrap();
    rig.tx.send_frame(&[0xB0, cc::CUTOFF, 127]).unwrap();
    assert!(rig.tx.send_frame(&[0xA0, 62, 10]).is_err());
    rig.block();

    assert_eq!(rig.engine.voices().sounding_count(), 1);
    assert_eq!(rig.engine.params().cutoff, 10_000.0);
}

#[test]
fn drum_hits_render_and_stop_when_leaving_drum_mode() {
    let mut rig = Rig::new(EngineConfig::default());
    rig.cc(cc::INSTRUMENT_MODE, 127);
    rig.send(MidiEvent::NoteOn { channel: 0, key: 38, velocity: 127 });
    assert!(rig.block() > 0.0);
    assert_eq!(rig.engine.drums().active_count(), 1);

    rig.cc(cc::INSTRUMENT_MODE, 0);
    rig.block();
    assert_eq!(rig.engine.drums().active_count(), 0);
}

#[test]
fn full_queue_reports_overflow() {
    let config = EngineConfig {
        queue_capacity: 4,
        ..EngineConfig::default()
    };
    let (mut tx, _engine) = channel(config);
    for key in 0..4 {
        tx.send(MidiEvent::NoteOn { channel: 0, key, velocity: 1 }).unwrap();
    }
    assert!(tx
        .send(MidiEvent::NoteOn { channel: 0, key: 99, velocity: 1 })
        .is_err());
}

fn voice_frequency(engine: &Groovebox, key: u8) -> Option<f32> {
    engine
        .voices()
        .voices()
        .iter()
        .find(|v| v.note() == key && v.key_down())
        .map(|v| v.frequency())
}

/// Hold middle C for half a second and return the left channel.
fn held_note_output(controls: &[(u8, u8)]) -> Vec<f32> {
    let mut rig = Rig::new(EngineConfig::default());
    for &(controller, value) in controls {
        rig.cc(controller, value);
    }
    rig.send(MidiEvent::NoteOn { channel: 0, key: 60, velocity: 100 });

    let mut out = Vec::with_capacity(500 * BLOCK);
    for _ in 0..500 {
        rig.block();
        out.extend_from_slice(&rig.left);
    }
    out
}

#[test]
fn mod_wheel_changes_a_held_note() {
    let still = held_note_output(&[(cc::VIBRATO_RATE, 127), (cc::MODWHEEL, 0)]);
    let wobbling = held_note_output(&[(cc::VIBRATO_RATE, 127), (cc::MODWHEEL, 127)]);

    let diff: f32 = still.iter().zip(&wobbling).map(|(a, b)| (a - b).abs()).sum();
    assert!(diff > 1.0, "mod wheel made no audible difference ({diff})");
}

#[test]
fn mod_wheel_at_zero_leaves_pitch_untouched() {
    let untouched = held_note_output(&[]);
    let zeroed = held_note_output(&[(cc::VIBRATO_RATE, 127), (cc::MODWHEEL, 0)]);
    assert_eq!(untouched, zeroed);
}

#[test]
fn vibrato_rate_sets_how_fast_pitch_moves() {
    // frequency excursion of a held A4 over a quarter second
    let spread = |rate: u8| {
        let mut rig = Rig::new(EngineConfig::default());
        rig.cc(cc::VIBRATO_RATE, rate);
        rig.cc(cc::MODWHEEL, 127);
        rig.send(MidiEvent::NoteOn { channel: 0, key: 69, velocity: 100 });

        let (mut lo, mut hi) = (f32::MAX, f32::MIN);
        for _ in 0..250 {
            rig.block();
            let hz = voice_frequency(&rig.engine, 69).unwrap();
            lo = lo.min(hz);
            hi = hi.max(hz);
        }
        hi - lo
    };

    let fast = spread(127);
    let slow = spread(0);
    assert!(fast > 8.0, "fast vibrato only moved {fast} Hz");
    assert!(slow < 2.0, "slow vibrato moved {slow} Hz");
}

#[test]
fn pitch_bend_retunes_a_held_note() {
    let mut rig = Rig::new(EngineConfig::default());
    rig.send(MidiEvent::NoteOn { channel: 0, key: 69, velocity: 100 });
    for _ in 0..10 {
        rig.block();
    }
    let before = voice_frequency(&rig.engine, 69).unwrap();
    assert!((before - 440.0).abs() < 0.01, "A4 at {before} Hz");

    rig.send(MidiEvent::pitch_bend(0, 16_383));
    rig.block();
    let after = voice_frequency(&rig.engine, 69).unwrap();
    let ratio = after / before;
    assert!(
        (ratio - 2f32.powf(2.0 / 12.0)).abs() < 1e-3,
        "bend moved A4 by a ratio of {ratio}"
    );
    assert_eq!(rig.engine.voices().sounding_count(), 1);

    rig.send(MidiEvent::pitch_bend(0, 8_192));
    rig.block();
    let back = voice_frequency(&rig.engine, 69).unwrap();
    assert!((back - before).abs() < 1e-3);
}
