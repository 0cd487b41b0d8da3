//! Driver for the Analog Devices AD9833 programmable waveform generator
//!
//! The AD9833 is a 28-bit DDS with two frequency registers, two phase
//! registers, and a three-wire write-only serial interface. This crate keeps a
//! shadow copy of every register and turns high-level requests (frequency in
//! Hz, phase in degrees, waveform mode) into the exact 16-bit write sequences
//! the chip expects.
//!
//! # Architecture Layers
//!
//! ```text
//! Application
//!         ↓
//! Ad9833<T>          (driver: shadow state + write sequencing)
//!         ↓
//! ControlWord / quantize   (pure register arithmetic)
//!         ↓
//! Transport          (SpiTransport on hardware, RecordingTransport on host)
//! ```
//!
//! # Features
//!
//! - `std`: link `std` (host builds)
//! - `defmt`: defmt logging and `defmt::Format` on all public types
//! - `tracing`: tracing logging (host builds)
//!
//! # Example
//!
//! ```
//! use ad9833::mock::RecordingTransport;
//! use ad9833::{Ad9833, Channel, DriverConfig, Mode};
//!
//! let mut dds = Ad9833::new(RecordingTransport::new(), DriverConfig::default()).unwrap();
//! dds.initialize().unwrap();
//!
//! dds.set_frequency(Channel::Ch1, 440.0).unwrap();
//! dds.set_active_frequency_channel(Channel::Ch1).unwrap();
//! dds.set_mode(Mode::Triangle).unwrap();
//!
//! assert_eq!(dds.frequency_word(Channel::Ch1), 4724);
//! ```
//!
//! On hardware, wrap an `embedded-hal` SPI bus (mode 2, MSB first) and the
//! FSYNC pin in a [`SpiTransport`]:
//!
//! ```ignore
//! let transport = SpiTransport::new(spi, fsync);
//! let mut dds = Ad9833::new(transport, DriverConfig::default())?;
//! dds.initialize()?;
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // register accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod driver;
pub mod error;
pub mod mock;
pub mod quantize;
pub mod registers;
pub mod transport;
pub mod types;

pub use config::{ConfigError, DriverConfig};
pub use control::ControlWord;
pub use driver::{Ad9833, ChannelState};
pub use error::{Error, ParseError};
pub use transport::{SpiTransport, SpiTransportError, Transport};
pub use types::{Channel, Mode};
