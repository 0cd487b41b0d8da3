//! Serial transport abstraction.
//!
//! The AD9833 is write-only: each 16-bit word is shifted in MSB first while
//! FSYNC is held low, and latched on the rising edge of FSYNC.
//!
//! ```text
//! FSYNC  ‾‾‾\______________________________/‾‾‾
//! SDATA      [ D15 … D8 ][ D7 … D0 ]
//!            high byte    low byte
//! ```
//!
//! [`Transport`] captures exactly that capability set so the register logic
//! can be exercised against [`crate::mock::RecordingTransport`] on the host
//! and against [`SpiTransport`] on real hardware.
//!
//! # Blocking
//!
//! Every method blocks until the underlying transfer has completed. There is
//! no timeout: a bus that never completes blocks the caller indefinitely.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Mode, SpiBus, MODE_2};

/// SPI bus mode required by the AD9833.
///
/// SDATA is sampled on the falling edge of SCLK with SCLK idling high
/// (CPOL = 1, CPHA = 0). Bit order is MSB first.
pub const SPI_MODE: Mode = MODE_2;

/// Maximum SCLK frequency supported by the AD9833 (Hz).
pub const MAX_SCLK_HZ: u32 = 40_000_000;

/// Capability the driver needs from the physical serial link.
pub trait Transport {
    /// Error type
    type Error: core::fmt::Debug;

    /// One-time setup of the signalling lines. Leaves FSYNC deasserted.
    fn configure(&mut self) -> Result<(), Self::Error>;

    /// Assert FSYNC (drive low) to open a 16-bit frame.
    fn begin_frame(&mut self) -> Result<(), Self::Error>;

    /// Deassert FSYNC (drive high) once every byte of the frame has left the bus.
    fn end_frame(&mut self) -> Result<(), Self::Error>;

    /// Full-duplex exchange of one byte. Returns the byte clocked in.
    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error>;

    /// Send one framed 16-bit word, high byte first.
    ///
    /// The frame is closed even when a byte transfer fails, so FSYNC never
    /// stays asserted across a failed write; the first error is returned.
    fn write_word(&mut self, word: u16) -> Result<(), Self::Error> {
        let [high, low] = word.to_be_bytes();
        self.begin_frame()?;
        let sent = self
            .transfer_byte(high)
            .and_then(|_| self.transfer_byte(low))
            .map(|_| ());
        let closed = self.end_frame();
        sent.and(closed)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn configure(&mut self) -> Result<(), Self::Error> {
        T::configure(self)
    }

    fn begin_frame(&mut self) -> Result<(), Self::Error> {
        T::begin_frame(self)
    }

    fn end_frame(&mut self) -> Result<(), Self::Error> {
        T::end_frame(self)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        T::transfer_byte(self, byte)
    }

    fn write_word(&mut self, word: u16) -> Result<(), Self::Error> {
        T::write_word(self, word)
    }
}

// ---------------------------------------------------------------------------
// embedded-hal adapter
// ---------------------------------------------------------------------------

/// Failure of the SPI bus or of the FSYNC pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiTransportError<S, P> {
    /// SPI bus error
    Spi(S),
    /// FSYNC GPIO error
    Pin(P),
}

/// [`Transport`] over an `embedded-hal` 1.0 [`SpiBus`] plus a GPIO for FSYNC.
///
/// The bus must be configured by the HAL for [`SPI_MODE`], MSB first, at or
/// below [`MAX_SCLK_HZ`]. The bus is used exclusively; to share it with other
/// devices, wrap the AD9833 in a dedicated bus handle.
pub struct SpiTransport<SPI, FSYNC> {
    spi: SPI,
    fsync: FSYNC,
}

impl<SPI, FSYNC> SpiTransport<SPI, FSYNC>
where
    SPI: SpiBus<u8>,
    FSYNC: OutputPin,
{
    /// Wrap a configured SPI bus and the FSYNC output pin.
    pub fn new(spi: SPI, fsync: FSYNC) -> Self {
        Self { spi, fsync }
    }

    /// Give back the bus and pin.
    pub fn release(self) -> (SPI, FSYNC) {
        (self.spi, self.fsync)
    }
}

impl<SPI, FSYNC> Transport for SpiTransport<SPI, FSYNC>
where
    SPI: SpiBus<u8>,
    FSYNC: OutputPin,
{
    type Error = SpiTransportError<SPI::Error, FSYNC::Error>;

    fn configure(&mut self) -> Result<(), Self::Error> {
        // Deselect before the first frame.
        self.fsync.set_high().map_err(SpiTransportError::Pin)
    }

    fn begin_frame(&mut self) -> Result<(), Self::Error> {
        self.fsync.set_low().map_err(SpiTransportError::Pin)
    }

    fn end_frame(&mut self) -> Result<(), Self::Error> {
        // FSYNC must not rise before the last bit has been clocked out, and
        // must rise even if the flush failed.
        let flushed = self.spi.flush().map_err(SpiTransportError::Spi);
        let raised = self.fsync.set_high().map_err(SpiTransportError::Pin);
        flushed.and(raised)
    }

    fn transfer_byte(&mut self, byte: u8) -> Result<u8, Self::Error> {
        let mut buffer = [byte];
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(SpiTransportError::Spi)?;
        let [received] = buffer;
        Ok(received)
    }
}
