use groovebox_dsp::{
    channel,
    control::cc,
    looper::LooperState,
    EngineConfig, MidiEvent,
};

fn looper_cc(value: u8) -> MidiEvent {
    MidiEvent::ControlChange {
        channel: 0,
        controller: cc::LOOPER_CONTROL,
        value,
    }
}

fn render(engine: &mut groovebox_dsp::Groovebox, frames: usize) -> (Vec<f32>, Vec<f32>) {
    let mut l = vec![0.0; frames];
    let mut r = vec![0.0; frames];
    engine.render_block(&mut l, &mut r);
    (l, r)
}

#[test]
fn double_playback_toggle_restores_playing() {
    let (mut tx, mut engine) = channel(EngineConfig::default());

    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    render(&mut engine, 480);
    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    render(&mut engine, 100);

    assert_eq!(engine.looper().state(), LooperState::Playing);
    assert_eq!(engine.looper().len(), 480);
    assert_eq!(engine.looper().play_position(), 100);

    tx.send(looper_cc(cc::LOOPER_PLAY_VALUE)).unwrap();
    render(&mut engine, 48);
    assert_eq!(engine.looper().state(), LooperState::Stopped);

    tx.send(looper_cc(cc::LOOPER_PLAY_VALUE)).unwrap();
    render(&mut engine, 0);
    assert_eq!(engine.looper().state(), LooperState::Playing);
    assert_eq!(engine.looper().play_position(), 0);
    assert_eq!(engine.looper().len(), 480);
}

#[test]
fn recording_past_capacity_auto_finishes() {
    let config = EngineConfig {
        sample_rate: 48_000.0,
        max_loop_seconds: 0.01,
        ..EngineConfig::default()
    };
    let capacity = config.loop_capacity();
    assert_eq!(capacity, 480);

    let (mut tx, mut engine) = channel(config);
    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    render(&mut engine, capacity * 3);

    assert_eq!(engine.looper().state(), LooperState::Playing);
    assert_eq!(engine.looper().len(), capacity);
    assert_eq!(engine.looper().capacity(), capacity);
}

#[test]
fn recorded_take_plays_back_scaled_by_level() {
    let (mut tx, mut engine) = channel(EngineConfig::default());

    // record a held note
    tx.send(MidiEvent::NoteOn { channel: 0, key: 57, velocity: 127 }).unwrap();
    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    let (take, _) = render(&mut engine, 960);

    // stop recording, silence the synth, play back at full level
    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    tx.send(MidiEvent::ControlChange { channel: 0, controller: cc::LOOPER_LEVEL, value: 127 })
        .unwrap();
    tx.send(MidiEvent::ControlChange { channel: 0, controller: cc::VOLUME, value: 0 }).unwrap();
    let (played, _) = render(&mut engine, 960);

    for (a, b) in take.iter().zip(&played) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn stop_clear_empties_the_take() {
    let (mut tx, mut engine) = channel(EngineConfig::default());
    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    render(&mut engine, 256);
    tx.send(looper_cc(cc::LOOPER_RECORD_VALUE)).unwrap();
    tx.send(looper_cc(cc::LOOPER_STOP_VALUE)).unwrap();
    render(&mut engine, 48);

    assert_eq!(engine.looper().state(), LooperState::Empty);
    assert!(engine.looper().is_empty());

    // nothing to play
    tx.send(looper_cc(cc::LOOPER_PLAY_VALUE)).unwrap();
    render(&mut engine, 48);
    assert_eq!(engine.looper().state(), LooperState::Empty);
}
