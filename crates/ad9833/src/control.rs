//! Control register model.
//!
//! [`ControlWord`] is the in-memory copy of the chip's write-only control
//! register. There is no read path on the AD9833, so every mode or channel
//! change is a read-modify-write against this copy.

use crate::registers::{bit, B28, DIV2, FSELECT, MODE, OPBITEN, PSELECT, RESET, SLEEP1, SLEEP12};
use crate::types::{Channel, Mode};

/// The five control bits owned by the waveform mode.
pub const MODE_BITS_MASK: u16 =
    bit(OPBITEN) | bit(MODE) | bit(DIV2) | bit(SLEEP1) | bit(SLEEP12);

/// Control-register pattern for `mode`, restricted to [`MODE_BITS_MASK`].
///
/// | Mode       | OPBITEN | MODE | DIV2 | SLEEP1 | SLEEP12 |
/// |------------|---------|------|------|--------|---------|
/// | Off        | 0       | 0    | 0    | 1      | 1       |
/// | Sine       | 0       | 0    | 0    | 0      | 0       |
/// | Square     | 1       | 0    | 1    | 0      | 0       |
/// | SquareHalf | 1       | 0    | 0    | 0      | 0       |
/// | Triangle   | 0       | 1    | 0    | 0      | 0       |
#[must_use]
pub const fn mode_bits(mode: Mode) -> u16 {
    match mode {
        Mode::Off => bit(SLEEP1) | bit(SLEEP12),
        Mode::Sine => 0,
        Mode::Square => bit(OPBITEN) | bit(DIV2),
        Mode::SquareHalf => bit(OPBITEN),
        Mode::Triangle => bit(MODE),
    }
}

/// 16-bit control register image. D15:D14 are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct ControlWord(u16);

impl ControlWord {
    /// Power-on image used by the driver: B28 set, everything else clear.
    #[must_use]
    pub const fn new() -> Self {
        Self(bit(B28))
    }

    /// Raw register value, ready to be written as a control word.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether the bit at `position` is set.
    #[must_use]
    pub const fn is_set(self, position: u8) -> bool {
        self.0 & bit(position) != 0
    }

    #[must_use]
    const fn with(self, position: u8, value: bool) -> Self {
        if value {
            Self(self.0 | bit(position))
        } else {
            Self(self.0 & !bit(position))
        }
    }

    /// Replace all five mode bits with the pattern for `mode`.
    #[must_use]
    pub const fn with_mode(self, mode: Mode) -> Self {
        Self((self.0 & !MODE_BITS_MASK) | mode_bits(mode))
    }

    /// Set FSELECT for `channel`; no other bit changes.
    #[must_use]
    pub const fn with_frequency_channel(self, channel: Channel) -> Self {
        self.with(FSELECT, matches!(channel, Channel::Ch1))
    }

    /// Set PSELECT for `channel`; no other bit changes.
    #[must_use]
    pub const fn with_phase_channel(self, channel: Channel) -> Self {
        self.with(PSELECT, matches!(channel, Channel::Ch1))
    }

    /// Set or clear RESET.
    #[must_use]
    pub const fn with_reset(self, held: bool) -> Self {
        self.with(RESET, held)
    }

    /// Channel currently selected by FSELECT.
    #[must_use]
    pub const fn frequency_channel(self) -> Channel {
        if self.is_set(FSELECT) {
            Channel::Ch1
        } else {
            Channel::Ch0
        }
    }

    /// Channel currently selected by PSELECT.
    #[must_use]
    pub const fn phase_channel(self) -> Channel {
        if self.is_set(PSELECT) {
            Channel::Ch1
        } else {
            Channel::Ch0
        }
    }

    /// Whether RESET is set.
    #[must_use]
    pub const fn reset_held(self) -> bool {
        self.is_set(RESET)
    }
}

impl Default for ControlWord {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ControlWord> for u16 {
    fn from(word: ControlWord) -> u16 {
        word.bits()
    }
}
