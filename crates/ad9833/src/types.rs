//! Channel and waveform-mode types.
//!
//! Both are closed enums so every `match` over them is exhaustive-checked.
//! Raw numbers coming from a UI or a wire protocol go through `TryFrom<u8>`,
//! which is the only place an out-of-range channel or mode can be rejected.
//! [`ParseError`] converts into [`crate::Error`] so `?` works in driver code.

use core::fmt;

use crate::error::ParseError;
use crate::registers::{SEL_FREQ0, SEL_FREQ1, SEL_PHASE0, SEL_PHASE1};

// ── Channel ──────────────────────────────────────────────────────────────────

/// One of the chip's two frequency/phase register pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// FREQ0 / PHASE0
    #[default]
    Ch0,
    /// FREQ1 / PHASE1
    Ch1,
}

impl Channel {
    /// Both channels, in register order.
    pub const ALL: [Channel; 2] = [Channel::Ch0, Channel::Ch1];

    /// Selector OR'd into both halves of a frequency load for this channel.
    #[must_use]
    pub const fn freq_selector(self) -> u16 {
        match self {
            Channel::Ch0 => SEL_FREQ0,
            Channel::Ch1 => SEL_FREQ1,
        }
    }

    /// Selector OR'd into a phase write for this channel.
    #[must_use]
    pub const fn phase_selector(self) -> u16 {
        match self {
            Channel::Ch0 => SEL_PHASE0,
            Channel::Ch1 => SEL_PHASE1,
        }
    }
}

impl From<Channel> for u8 {
    fn from(c: Channel) -> u8 {
        match c {
            Channel::Ch0 => 0,
            Channel::Ch1 => 1,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::Ch0),
            1 => Ok(Channel::Ch1),
            other => Err(ParseError::Channel(other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH{}", u8::from(*self))
    }
}

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Output waveform mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// MCLK stopped and DAC powered down.
    Off,
    /// Sinusoid from the sine ROM.
    #[default]
    Sine,
    /// Square wave: DAC MSB routed straight to VOUT (DIV2 set).
    Square,
    /// Square wave at half rate: DAC MSB divided by two (DIV2 clear).
    SquareHalf,
    /// Triangle: sine ROM bypassed, accumulator output fed to the DAC.
    Triangle,
}

impl Mode {
    /// All five modes.
    pub const ALL: [Mode; 5] = [
        Mode::Off,
        Mode::Sine,
        Mode::Square,
        Mode::SquareHalf,
        Mode::Triangle,
    ];
}

impl From<Mode> for u8 {
    fn from(m: Mode) -> u8 {
        match m {
            Mode::Off => 0,
            Mode::Sine => 1,
            Mode::Square => 2,
            Mode::SquareHalf => 3,
            Mode::Triangle => 4,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Off),
            1 => Ok(Mode::Sine),
            2 => Ok(Mode::Square),
            3 => Ok(Mode::SquareHalf),
            4 => Ok(Mode::Triangle),
            other => Err(ParseError::Mode(other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Off => "off",
            Mode::Sine => "sine",
            Mode::Square => "square",
            Mode::SquareHalf => "square/2",
            Mode::Triangle => "triangle",
        };
        f.write_str(name)
    }
}
