//! AD9833 register map
//!
//! Source: Analog Devices AD9833 Data Sheet Rev. G, Tables 6–9.
//!
//! Every write to the chip is a single 16-bit word. Bits \[15:14\] address the
//! target register:
//!
//! | D15 | D14 | D13 | Target |
//! |-----|-----|-----|--------|
//! | 0   | 0   | –   | Control register (D13..D0 = control bits) |
//! | 0   | 1   | –   | FREQ0 (D13..D0 = 14 data bits) |
//! | 1   | 0   | –   | FREQ1 (D13..D0 = 14 data bits) |
//! | 1   | 1   | 0   | PHASE0 (D11..D0 = 12 data bits) |
//! | 1   | 1   | 1   | PHASE1 (D11..D0 = 12 data bits) |
//!
//! ## B28 two-write loading
//! With B28 set, a 28-bit frequency word is loaded as two consecutive writes
//! to the same frequency register: the 14 LSBs first, then the 14 MSBs. The
//! chip holds the first write internally until the second arrives, so the
//! order is mandatory. B28 must be latched into the control register before
//! the first frequency write.
//!
//! ## RESET
//! RESET zeroes the phase accumulator and parks the DAC output at mid-scale.
//! Frequency and phase registers are unaffected, which is why the bring-up
//! sequence programs them while RESET is held.

// ---------------------------------------------------------------------------
// Control register bit positions
// ---------------------------------------------------------------------------

/// D13: load the frequency register as two consecutive 14-bit writes.
pub const B28: u8 = 13;

/// D12: with B28 clear, selects which half (MSB/LSB) a frequency write targets.
pub const HLB: u8 = 12;

/// D11: FREQ1 (1) or FREQ0 (0) drives the phase accumulator.
pub const FSELECT: u8 = 11;

/// D10: PHASE1 (1) or PHASE0 (0) is added to the phase accumulator.
pub const PSELECT: u8 = 10;

/// D8: hold the internal registers in reset.
pub const RESET: u8 = 8;

/// D7: disable MCLK (DAC output stays at its present value).
pub const SLEEP1: u8 = 7;

/// D6: power down the on-chip DAC.
pub const SLEEP12: u8 = 6;

/// D5: route the DAC data MSB to VOUT (square output).
pub const OPBITEN: u8 = 5;

/// D3: with OPBITEN set, output the MSB directly (1) or MSB/2 (0).
pub const DIV2: u8 = 3;

/// D1: triangle (1) or sine (0) output when OPBITEN is clear.
pub const MODE: u8 = 1;

// ---------------------------------------------------------------------------
// Register address selectors (bits 15:13 of a data write)
// ---------------------------------------------------------------------------

/// Address bit for FREQ0 writes (D14).
pub const ADDR_FREQ0: u8 = 14;

/// Address bit for FREQ1 writes (D15).
pub const ADDR_FREQ1: u8 = 15;

/// Phase-register select bit (D13) within a phase write.
pub const ADDR_PHASE: u8 = 13;

/// Selector OR'd into both halves of a FREQ0 load.
pub const SEL_FREQ0: u16 = 1 << ADDR_FREQ0;

/// Selector OR'd into both halves of a FREQ1 load.
pub const SEL_FREQ1: u16 = 1 << ADDR_FREQ1;

/// Selector OR'd into a PHASE0 write.
pub const SEL_PHASE0: u16 = (1 << ADDR_FREQ0) | (1 << ADDR_FREQ1);

/// Selector OR'd into a PHASE1 write.
pub const SEL_PHASE1: u16 = (1 << ADDR_FREQ0) | (1 << ADDR_FREQ1) | (1 << ADDR_PHASE);

// ---------------------------------------------------------------------------
// Field widths
// ---------------------------------------------------------------------------

/// Mask for one 14-bit half of a frequency word.
pub const FREQ_HALF_MASK: u32 = 0x3FFF;

/// Number of data bits per frequency half-word.
pub const FREQ_HALF_BITS: u32 = 14;

/// Mask for the full 28-bit frequency tuning word.
pub const FREQ_WORD_MASK: u32 = 0x0FFF_FFFF;

/// Mask for the 12-bit phase word.
pub const PHASE_WORD_MASK: u16 = 0x0FFF;

/// Phase accumulator full scale: 2^28.
pub const FREQ_FULL_SCALE: f64 = 268_435_456.0;

/// Phase register full scale: 2^12 steps per revolution.
pub const PHASE_FULL_SCALE: f64 = 4096.0;

/// Master clock of the reference design (Hz).
pub const DEFAULT_MCLK_HZ: u32 = 25_000_000;

/// Bit mask for a single control-register bit position.
#[inline]
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // position < 16 at every call site
pub const fn bit(position: u8) -> u16 {
    1 << position
}
