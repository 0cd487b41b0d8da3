//! Property-based tests for tuning-word math and register sequencing.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use ad9833::mock::RecordingTransport;
use ad9833::quantize::{
    dequantize_frequency, dequantize_phase, frequency_resolution_hz, max_frequency_hz,
    quantize_frequency, quantize_phase, split_frequency_word, PHASE_RESOLUTION_DEG,
};
use ad9833::registers::DEFAULT_MCLK_HZ;
use ad9833::{Ad9833, Channel, ControlWord, DriverConfig, Mode};
use proptest::prelude::*;

fn any_mode() -> impl Strategy<Value = Mode> {
    prop::sample::select(Mode::ALL.to_vec())
}

fn any_channel() -> impl Strategy<Value = Channel> {
    prop::sample::select(Channel::ALL.to_vec())
}

proptest! {
    /// quantize → dequantize lands within one LSB of the request.
    #[test]
    fn frequency_round_trip_within_one_lsb(hz in 0.0f64..12_500_000.0) {
        let word = quantize_frequency(hz, DEFAULT_MCLK_HZ).unwrap();
        let back = dequantize_frequency(word, DEFAULT_MCLK_HZ);
        let lsb = frequency_resolution_hz(DEFAULT_MCLK_HZ);
        prop_assert!((back - hz).abs() <= lsb,
            "{} Hz → word {} → {} Hz (lsb {})", hz, word, back, lsb);
    }

    /// Other master clocks obey the same bound.
    #[test]
    fn frequency_round_trip_any_mclk(mclk in 1_000_000u32..=25_000_000, frac in 0.0f64..0.5) {
        let hz = f64::from(mclk) * frac;
        let word = quantize_frequency(hz, mclk).unwrap();
        let back = dequantize_frequency(word, mclk);
        prop_assert!((back - hz).abs() <= frequency_resolution_hz(mclk));
    }

    /// Quantization never produces a word wider than 28 bits.
    #[test]
    fn frequency_word_fits_28_bits(hz in 0.0f64..30_000_000.0) {
        if let Some(word) = quantize_frequency(hz, DEFAULT_MCLK_HZ) {
            prop_assert!(word <= 0x0FFF_FFFF);
            prop_assert!(hz <= max_frequency_hz(DEFAULT_MCLK_HZ) + frequency_resolution_hz(DEFAULT_MCLK_HZ));
        }
    }

    /// The 14-bit halves recombine to the original word.
    #[test]
    fn split_halves_recombine(word in 0u32..=0x0FFF_FFFF) {
        let (low, high) = split_frequency_word(word);
        prop_assert!(low <= 0x3FFF && high <= 0x3FFF);
        prop_assert_eq!((u32::from(high) << 14) | u32::from(low), word);
    }

    /// Phase round-trip within one LSB for [0, 360).
    #[test]
    fn phase_round_trip_within_one_lsb(deg in 0.0f64..359.9) {
        let word = quantize_phase(deg).unwrap();
        let back = dequantize_phase(word);
        prop_assert!((back - deg).abs() <= PHASE_RESOLUTION_DEG,
            "{}° → word {} → {}°", deg, word, back);
    }

    /// Adding whole turns does not change the phase word.
    #[test]
    fn phase_wraps_every_turn(deg in 0.0f64..360.0, turns in -4i32..=4) {
        let shifted = deg + 360.0 * f64::from(turns);
        let a = quantize_phase(deg).unwrap();
        let b = quantize_phase(shifted).unwrap();
        // Rounding may land on either side of a word boundary after the shift.
        let diff = (i32::from(a) - i32::from(b)).rem_euclid(4096);
        prop_assert!(diff == 0 || diff == 1 || diff == 4095, "{} vs {}", a, b);
    }

    /// set_mode is idempotent and touches only the mode bits.
    #[test]
    fn with_mode_is_idempotent(first in any_mode(), second in any_mode(),
                               fsel in any_channel(), psel in any_channel(), reset in any::<bool>()) {
        let base = ControlWord::new()
            .with_frequency_channel(fsel)
            .with_phase_channel(psel)
            .with_reset(reset)
            .with_mode(first);
        let once = base.with_mode(second);
        prop_assert_eq!(once.with_mode(second), once);
        prop_assert_eq!(once.frequency_channel(), fsel);
        prop_assert_eq!(once.phase_channel(), psel);
        prop_assert_eq!(once.reset_held(), reset);
        prop_assert_eq!(once.bits() & 0xC000, 0);
    }

    /// Any frequency change is exactly control, low half, high half on the
    /// right selector, and is reflected by the getters.
    #[test]
    fn frequency_write_shape(channel in any_channel(), hz in 0.0f32..12_000_000.0, mode in any_mode()) {
        let mut transport = RecordingTransport::new();
        let mut dds = Ad9833::new(&mut transport, DriverConfig::default()).unwrap();
        dds.initialize().unwrap();
        dds.set_mode(mode).unwrap();
        let before = dds.transport().words().len();

        dds.set_frequency(channel, hz).unwrap();

        let words = dds.transport().words().get(before..).unwrap().to_vec();
        prop_assert_eq!(words.len(), 3);
        prop_assert_eq!(words.first().copied(), Some(dds.control_word().bits()));
        let select = channel.freq_selector();
        for half in words.iter().skip(1) {
            prop_assert_eq!(half & 0xC000, select);
        }
        let low = u32::from(words.get(1).copied().unwrap_or_default() & 0x3FFF);
        let high = u32::from(words.get(2).copied().unwrap_or_default() & 0x3FFF);
        prop_assert_eq!((high << 14) | low, dds.frequency_word(channel));
        prop_assert_eq!(dds.frequency(channel), hz);
    }
}
