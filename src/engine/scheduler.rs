use rtrb::Consumer;

use crate::{
    control::{InstrumentMode, Interpreter, ParameterSet, Targets},
    drums::DrumEngine,
    dsp::distortion::hard_clip,
    effects::EffectsChain,
    engine::config::EngineConfig,
    io::midi::MidiEvent,
    looper::Looper,
    synth::{PitchMod, RoundRobin, StealPolicy, VoicePool},
};

/// The whole instrument.
///
/// Per block:
/// 1. drain every queued command, in order
/// 2. snapshot the parameters into the effects chain
/// 3. per sample: voices (+ drums in drum mode) → effects → master gain →
///    looper → clip
///
/// Commands therefore land on block boundaries, never mid-block.
pub struct Groovebox<P: StealPolicy = RoundRobin> {
    config: EngineConfig,
    params: ParameterSet,
    interpreter: Interpreter,
    voices: VoicePool<P>,
    drums: DrumEngine,
    effects: EffectsChain,
    looper: Looper,
    rx: Consumer<MidiEvent>,

    dry: Vec<f32>,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl Groovebox<RoundRobin> {
    pub fn new(config: EngineConfig, rx: Consumer<MidiEvent>) -> Self {
        Self::with_policy(config, rx, RoundRobin::new())
    }
}

impl<P: StealPolicy> Groovebox<P> {
    pub fn with_policy(config: EngineConfig, rx: Consumer<MidiEvent>, policy: P) -> Self {
        let sr = config.sample_rate;
        let params = ParameterSet::default();

        let mut voices = VoicePool::with_policy(sr, config.voices, policy);
        voices.set_envelope(params.attack, params.decay, params.sustain, params.release);
        voices.set_vibrato_rate(params.vibrato_rate);

        let mut effects = EffectsChain::new(sr);
        effects.configure(&params);

        let looper = Looper::new(config.loop_capacity());
        let scratch = config.scratch_len();

        log::info!(
            "groovebox: {} Hz, {} voices, {} drum slots, {:.1} s loop ({} frames), channel {}",
            sr,
            voices.voices().len(),
            config.drum_voices.max(1),
            config.max_loop_seconds,
            looper.capacity(),
            config.channel,
        );

        Self {
            interpreter: Interpreter::new(config.channel, config.pitch_bend_range),
            drums: DrumEngine::new(sr, config.drum_voices),
            voices,
            effects,
            looper,
            params,
            rx,
            dry: vec![0.0; scratch],
            left: vec![0.0; scratch],
            right: vec![0.0; scratch],
            config,
        }
    }

    /// Apply one command right now. The queue path calls this between
    /// blocks; tests and offline hosts can call it directly.
    pub fn handle_event(&mut self, event: MidiEvent) -> bool {
        self.interpreter.apply(
            event,
            Targets {
                params: &mut self.params,
                voices: &mut self.voices,
                drums: &mut self.drums,
                looper: &mut self.looper,
            },
        )
    }

    fn drain_commands(&mut self) {
        while let Ok(event) = self.rx.pop() {
            self.handle_event(event);
        }
    }

    /// Render one block into `left`/`right`. Renders the shorter of the two
    /// lengths and zeroes the rest of the longer one; any block size works.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.drain_commands();
        self.effects.configure(&self.params);

        let frames = left.len().min(right.len());
        let step = self.dry.len();
        for start in (0..frames).step_by(step) {
            let end = (start + step).min(frames);
            self.render_chunk(&mut left[start..end], &mut right[start..end]);
        }
        left[frames..].fill(0.0);
        right[frames..].fill(0.0);
    }

    /// Render into an interleaved buffer of `channels` channels. Channels
    /// past the second get the left signal; a mono buffer gets the average.
    /// A trailing partial frame is zeroed.
    pub fn render_interleaved(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        self.drain_commands();
        self.effects.configure(&self.params);

        let whole = out.len() - out.len() % channels;
        let (out, partial) = out.split_at_mut(whole);
        partial.fill(0.0);

        for chunk in out.chunks_mut(self.dry.len() * channels) {
            let frames = chunk.len() / channels;
            let mut left = std::mem::take(&mut self.left);
            let mut right = std::mem::take(&mut self.right);
            self.render_chunk(&mut left[..frames], &mut right[..frames]);

            for (i, frame) in chunk.chunks_mut(channels).enumerate().take(frames) {
                match frame {
                    [mono] => *mono = 0.5 * (left[i] + right[i]),
                    [l, r, rest @ ..] => {
                        *l = left[i];
                        *r = right[i];
                        rest.fill(left[i]);
                    }
                    [] => {}
                }
            }

            self.left = left;
            self.right = right;
        }
    }

    fn render_chunk(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len();
        let dry = &mut self.dry[..frames];
        dry.fill(0.0);

        let p = &self.params;
        let pitch = PitchMod {
            bend: p.pitch_bend,
            vibrato_depth: p.vibrato_depth * p.mod_wheel,
        };

        self.voices.render(dry, pitch);
        if p.mode == InstrumentMode::DrumKit {
            self.drums.render(dry);
        }

        self.effects.render(dry, left, right);

        let gain = p.master_gain;
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            *l *= gain;
            *r *= gain;
        }

        self.looper.render(left, right, p.looper_level);

        for s in left.iter_mut().chain(right.iter_mut()) {
            *s = hard_clip(*s, 1.0);
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn voices(&self) -> &VoicePool<P> {
        &self.voices
    }

    pub fn drums(&self) -> &DrumEngine {
        &self.drums
    }

    pub fn effects(&self) -> &EffectsChain {
        &self.effects
    }

    pub fn looper(&self) -> &Looper {
        &self.looper
    }
}
