//! Audio side: opens the output device and runs the engine in the callback.
//!
//! The engine is moved into the callback whole. The UI talks to it only
//! through the command queue and reads back through two rings (scope samples
//! and status snapshots), so nothing here locks.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};

use groovebox_dsp::{channel, CommandSender, EngineConfig};

use crate::ui::state::StatusUpdate;

/// Scope ring capacity in samples.
const SCOPE_RING_LEN: usize = 16 * 1024;
const STATUS_RING_LEN: usize = 32;

pub struct AudioHandle {
    /// Keeps the stream alive.
    _stream: cpal::Stream,
    pub sample_rate: f32,
    pub commands: CommandSender,
    pub scope_rx: Consumer<f32>,
    pub status_rx: Consumer<StatusUpdate>,
}

pub fn start(config: EngineConfig) -> EyreResult<AudioHandle> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = usize::from(stream_config.channels()).max(1);

    let (commands, mut engine) = channel(config.with_sample_rate(sample_rate));
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING_LEN);
    let (mut status_tx, status_rx) = RingBuffer::<StatusUpdate>::new(STATUS_RING_LEN);

    let stream = device
        .build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                engine.render_interleaved(data, channels);

                // first channel to the scope; drop whatever does not fit
                for frame in data.chunks(channels) {
                    if scope_tx.push(frame[0]).is_err() {
                        break;
                    }
                }
                let _ = status_tx.push(StatusUpdate::capture(&engine));
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    Ok(AudioHandle {
        _stream: stream,
        sample_rate,
        commands,
        scope_rx,
        status_rx,
    })
}
