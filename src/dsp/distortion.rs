//! Waveshaping.
//!
//! `saturate` is the drive stage of the effects chain: a tanh curve whose
//! input gain grows from 1x to 7x as the drive control goes 0 → 1. Low drive
//! rounds off peaks, high drive squares the wave up.
//!
//! `hard_clip` is the output safety net: whatever upstream did, the block that
//! leaves the engine stays within ±1.

/// Input gain for a 0..1 drive amount.
#[inline]
pub fn drive_gain(drive: f32) -> f32 {
    1.0 + 6.0 * drive.clamp(0.0, 1.0)
}

/// Soft saturation: `tanh(x · (1 + 6 · drive))`.
#[inline]
pub fn saturate(sample: f32, drive: f32) -> f32 {
    (sample * drive_gain(drive)).tanh()
}

/// Clamp to ±threshold. NaN maps to silence.
#[inline]
pub fn hard_clip(sample: f32, threshold: f32) -> f32 {
    if sample.is_nan() {
        0.0
    } else {
        sample.clamp(-threshold, threshold)
    }
}
