//! Driver configuration.
//!
//! The AD9833 has no way to report its master clock, so the driver has to be
//! told. The defaults reproduce the reference board: a 25 MHz oscillator and
//! both channels parked at 1 kHz / 0° after bring-up.

use thiserror_no_std::Error;

use crate::quantize::{quantize_frequency, quantize_phase};
use crate::registers::DEFAULT_MCLK_HZ;

/// Frequency programmed into both channels by [`crate::Ad9833::initialize`].
pub const DEFAULT_FREQUENCY_HZ: f32 = 1000.0;

/// Phase programmed into both channels by [`crate::Ad9833::initialize`].
pub const DEFAULT_PHASE_DEG: f32 = 0.0;

/// Reason a [`DriverConfig`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `master_clock_hz` is zero.
    #[error("master clock must be non-zero")]
    ZeroMasterClock,
    /// `default_frequency_hz` does not fit the 28-bit tuning word.
    #[error("default frequency outside the tuning range")]
    DefaultFrequency,
    /// `default_phase_deg` is not finite.
    #[error("default phase must be finite")]
    DefaultPhase,
}

/// Static configuration of one AD9833 instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// MCLK frequency in Hz (the chip is rated up to 25 MHz).
    pub master_clock_hz: u32,
    /// Frequency loaded into FREQ0 and FREQ1 during bring-up.
    pub default_frequency_hz: f32,
    /// Phase loaded into PHASE0 and PHASE1 during bring-up.
    pub default_phase_deg: f32,
}

impl DriverConfig {
    /// Reference design: 25 MHz MCLK, 1 kHz, 0°.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            master_clock_hz: DEFAULT_MCLK_HZ,
            default_frequency_hz: DEFAULT_FREQUENCY_HZ,
            default_phase_deg: DEFAULT_PHASE_DEG,
        }
    }

    /// Same defaults with a different master clock.
    #[must_use]
    pub const fn with_master_clock(mut self, master_clock_hz: u32) -> Self {
        self.master_clock_hz = master_clock_hz;
        self
    }

    /// Check that the master clock is non-zero and both defaults quantize.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.master_clock_hz == 0 {
            return Err(ConfigError::ZeroMasterClock);
        }
        quantize_frequency(f64::from(self.default_frequency_hz), self.master_clock_hz)
            .ok_or(ConfigError::DefaultFrequency)?;
        quantize_phase(f64::from(self.default_phase_deg)).ok_or(ConfigError::DefaultPhase)?;
        Ok(())
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_design() {
        let config = DriverConfig::default();
        assert_eq!(config.master_clock_hz, 25_000_000);
        assert!((config.default_frequency_hz - 1000.0).abs() < f32::EPSILON);
        assert!(config.default_phase_deg.abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_master_clock_is_rejected() {
        assert_eq!(
            DriverConfig::new().with_master_clock(0).validate(),
            Err(ConfigError::ZeroMasterClock)
        );
    }

    #[test]
    fn unreachable_default_frequency_is_rejected() {
        let config = DriverConfig {
            default_frequency_hz: 30_000_000.0,
            ..DriverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DefaultFrequency));
    }

    #[test]
    fn non_finite_default_phase_is_rejected() {
        let config = DriverConfig {
            default_phase_deg: f32::NAN,
            ..DriverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DefaultPhase));
    }
}
