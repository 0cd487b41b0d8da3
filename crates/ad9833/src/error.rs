//! Driver error type

use thiserror_no_std::Error;

use crate::config::ConfigError;

/// Errors returned by [`crate::Ad9833`] operations.
///
/// `E` is the error type of the injected [`crate::Transport`].
///
/// Every variant except [`Error::Transport`] is raised before the first write
/// of an operation, so the chip and the driver's shadow state are untouched.
/// A transport failure aborts the remaining writes of the operation; the
/// shadow state keeps its previous value while the chip may hold a partial
/// update. Re-issuing the whole operation brings both back in step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error<E> {
    /// A framed 16-bit write did not complete.
    #[error("transport failure: {0:?}")]
    Transport(E),

    /// A register write was requested before [`crate::Ad9833::initialize`].
    #[error("driver not initialized")]
    NotInitialized,

    /// Frequency is negative, not finite, or exceeds the 28-bit tuning range.
    #[error("frequency outside the 28-bit tuning range")]
    FrequencyOutOfRange,

    /// Phase is not a finite number of degrees.
    #[error("phase must be finite")]
    InvalidPhase,

    /// Raw channel number outside {0, 1} (see [`ParseError`]).
    #[error("invalid channel {0}")]
    InvalidChannel(u8),

    /// Raw mode number outside the five defined waveform modes.
    #[error("invalid mode {0}")]
    InvalidMode(u8),

    /// Driver configuration rejected by [`crate::DriverConfig::validate`].
    #[error("invalid driver configuration: {0}")]
    InvalidConfig(ConfigError),
}

#[cfg(feature = "defmt")]
impl<E: core::fmt::Debug> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::Transport(_) => defmt::write!(f, "Transport"),
            Self::NotInitialized => defmt::write!(f, "NotInitialized"),
            Self::FrequencyOutOfRange => defmt::write!(f, "FrequencyOutOfRange"),
            Self::InvalidPhase => defmt::write!(f, "InvalidPhase"),
            Self::InvalidChannel(c) => defmt::write!(f, "InvalidChannel({=u8})", c),
            Self::InvalidMode(m) => defmt::write!(f, "InvalidMode({=u8})", m),
            Self::InvalidConfig(e) => defmt::write!(f, "InvalidConfig({})", e),
        }
    }
}

/// A raw number that names neither a channel nor a waveform mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Channel number outside {0, 1}.
    #[error("invalid channel {0}")]
    Channel(u8),
    /// Mode number outside 0..=4.
    #[error("invalid mode {0}")]
    Mode(u8),
}

impl<E> From<ParseError> for Error<E> {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Channel(c) => Error::InvalidChannel(c),
            ParseError::Mode(m) => Error::InvalidMode(m),
        }
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::InvalidConfig(e)
    }
}

impl<E> Error<E> {
    /// Whether the error came from the transport (as opposed to input validation).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[test]
    fn parse_error_maps_to_matching_variant() {
        assert_eq!(Error::<Infallible>::from(ParseError::Channel(7)), Error::InvalidChannel(7));
        assert_eq!(Error::<Infallible>::from(ParseError::Mode(9)), Error::InvalidMode(9));
    }

    #[test]
    fn only_transport_errors_report_as_transport() {
        assert!(Error::Transport(()).is_transport());
        assert!(!Error::<()>::NotInitialized.is_transport());
    }

    #[test]
    fn display_includes_offending_value() {
        let text = std::format!("{}", Error::<Infallible>::InvalidChannel(3));
        assert_eq!(text, "invalid channel 3");
    }
}
