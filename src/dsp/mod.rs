//! Low-level DSP primitives used by the voices and the effects chain.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! making them safe to embed directly inside voice structs and to run from
//! the audio callback.

/// Fixed-capacity feedback delay line.
pub mod delay;
/// Waveshaping: tanh drive and output clipping.
pub mod distortion;
/// Gated ADSR and one-shot exponential decay.
pub mod envelope;
/// State-variable filter.
pub mod filter;
/// Oscillator waveforms and noise sources.
pub mod oscillator;
/// Stereo Schroeder reverb.
pub mod reverb;

pub use envelope::EnvelopeState;
