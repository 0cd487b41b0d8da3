//! Fixed-point conversions between user units and register words.
//!
//! # Frequency
//!
//! The phase accumulator is 28 bits wide and advances by the tuning word on
//! every MCLK edge, so:
//!
//! ```text
//! f_out = word × f_MCLK / 2^28
//! word  = round(f_out × 2^28 / f_MCLK)
//! ```
//!
//! At 25 MHz one LSB is 25e6 / 2^28 ≈ 0.0931 Hz. The arithmetic runs in `f64`:
//! an `f32` product loses up to ~16 LSBs near the top of the range.
//!
//! # Phase
//!
//! The phase register adds `word × 2π / 4096` radians to the accumulator
//! output, so one LSB is 360 / 4096 ≈ 0.0879°:
//!
//! ```text
//! word = round(degrees × 4096 / 360) mod 4096
//! ```
//!
//! The modulo makes 360° alias to 0° and negative angles wrap into range.
//!
//! Rounding is done by hand (`+0.5` then truncate) because `f64::round` is not
//! available in `core`.

// Float → integer casts in this module are range-checked before they happen.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::registers::{FREQ_FULL_SCALE, FREQ_WORD_MASK, PHASE_FULL_SCALE, PHASE_WORD_MASK};

/// Frequency resolution in Hz for a master clock of `mclk_hz`.
#[must_use]
pub fn frequency_resolution_hz(mclk_hz: u32) -> f64 {
    f64::from(mclk_hz) / FREQ_FULL_SCALE
}

/// Phase resolution in degrees (one LSB of the 12-bit phase word).
pub const PHASE_RESOLUTION_DEG: f64 = 360.0 / PHASE_FULL_SCALE;

/// Highest frequency (Hz) whose tuning word still fits in 28 bits.
#[must_use]
pub fn max_frequency_hz(mclk_hz: u32) -> f64 {
    f64::from(FREQ_WORD_MASK) * frequency_resolution_hz(mclk_hz)
}

/// Quantize `hz` to a 28-bit tuning word, rounding to nearest.
///
/// Returns `None` if `hz` is negative, not finite, or rounds to a word above
/// `0x0FFF_FFFF`. A zero master clock also yields `None`.
#[must_use]
pub fn quantize_frequency(hz: f64, mclk_hz: u32) -> Option<u32> {
    if !hz.is_finite() || hz < 0.0 || mclk_hz == 0 {
        return None;
    }
    let scaled = hz * FREQ_FULL_SCALE / f64::from(mclk_hz);
    let rounded = scaled + 0.5;
    if rounded >= f64::from(FREQ_WORD_MASK) + 1.0 {
        return None;
    }
    Some(rounded as u32)
}

/// Synthesized output frequency (Hz) for a 28-bit tuning `word`.
#[must_use]
pub fn dequantize_frequency(word: u32, mclk_hz: u32) -> f64 {
    f64::from(word & FREQ_WORD_MASK) * frequency_resolution_hz(mclk_hz)
}

/// Quantize `degrees` to a 12-bit phase word, rounding to nearest and
/// wrapping modulo 360°.
///
/// Returns `None` if `degrees` is not finite.
#[must_use]
pub fn quantize_phase(degrees: f64) -> Option<u16> {
    if !degrees.is_finite() {
        return None;
    }
    let scaled = degrees / PHASE_RESOLUTION_DEG;
    // Saturating cast; anything beyond i64 range is meaningless as an angle
    // but still lands inside the 12-bit mask.
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5) as i64
    } else {
        (scaled - 0.5) as i64
    };
    Some((rounded & i64::from(PHASE_WORD_MASK)) as u16)
}

/// Phase offset in degrees (0 ≤ result < 360) for a 12-bit phase `word`.
#[must_use]
pub fn dequantize_phase(word: u16) -> f64 {
    f64::from(word & PHASE_WORD_MASK) * PHASE_RESOLUTION_DEG
}

/// Split a 28-bit tuning word into its (low, high) 14-bit halves.
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // shift by a constant 14
pub const fn split_frequency_word(word: u32) -> (u16, u16) {
    use crate::registers::{FREQ_HALF_BITS, FREQ_HALF_MASK};
    let low = (word & FREQ_HALF_MASK) as u16;
    let high = ((word >> FREQ_HALF_BITS) & FREQ_HALF_MASK) as u16;
    (low, high)
}
