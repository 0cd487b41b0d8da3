//! SPI adapter tests — verify bus and FSYNC activity against embedded-hal mocks.
//!
//! Each 16-bit word must appear on the bus as:
//!   FSYNC low, high byte, low byte, flush, FSYNC high
//!
//! Run with: cargo test -p ad9833 --test spi_transport

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use ad9833::{Ad9833, Channel, DriverConfig, Error, SpiTransport, SpiTransportError, Transport};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
use embedded_hal_mock::eh1::MockError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// SPI expectations for one framed word.
fn spi_word(word: u16) -> [SpiTransaction<u8>; 3] {
    let [high, low] = word.to_be_bytes();
    [
        SpiTransaction::transfer_in_place(vec![high], vec![0x00]),
        SpiTransaction::transfer_in_place(vec![low], vec![0x00]),
        SpiTransaction::flush(),
    ]
}

/// FSYNC expectations for one framed word.
fn fsync_word() -> [PinTransaction; 2] {
    [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]
}

/// Expectations for a whole word sequence, preceded by `configure`.
fn expectations(words: &[u16]) -> (Vec<SpiTransaction<u8>>, Vec<PinTransaction>) {
    let mut spi = Vec::new();
    let mut fsync = vec![PinTransaction::set(PinState::High)];
    for &word in words {
        spi.extend(spi_word(word));
        fsync.extend(fsync_word());
    }
    (spi, fsync)
}

/// SPI bus that shifts bytes fine but fails every `flush`.
struct FlushFails;

impl ErrorType for FlushFails {
    type Error = ErrorKind;
}

impl SpiBus<u8> for FlushFails {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// FSYNC that must go high (configure), low (frame open), high (frame closed).
fn fsync_one_frame() -> PinMock {
    PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn configure_deselects_the_chip() {
    let mut spi = SpiMock::new(&[]);
    let mut fsync = PinMock::new(&[PinTransaction::set(PinState::High)]);

    let mut transport = SpiTransport::new(spi.clone(), fsync.clone());
    transport.configure().unwrap();

    spi.done();
    fsync.done();
}

#[test]
fn word_is_sent_high_byte_first_inside_one_frame() {
    let mut spi = SpiMock::new(&spi_word(0x2100));
    let mut fsync = PinMock::new(&fsync_word());

    let mut transport = SpiTransport::new(spi.clone(), fsync.clone());
    transport.write_word(0x2100).unwrap();

    spi.done();
    fsync.done();
}

/// The full bring-up sequence through the real adapter.
#[test]
fn initialize_over_spi() {
    let words = [
        0x2000, 0x2100, 0x2100, 0x69F1, 0x4000, 0x2100, 0xA9F1, 0x8000, 0xC000, 0xE000, 0x2000,
        0x2000, 0x2000, 0x2000,
    ];
    let (spi_txns, fsync_txns) = expectations(&words);
    let mut spi = SpiMock::new(&spi_txns);
    let mut fsync = PinMock::new(&fsync_txns);

    let transport = SpiTransport::new(spi.clone(), fsync.clone());
    let mut dds = Ad9833::new(transport, DriverConfig::default()).unwrap();
    dds.initialize().unwrap();
    assert!(dds.is_initialized());

    let (_spi, _fsync) = dds.release().release();
    spi.done();
    fsync.done();
}

#[test]
fn phase_write_over_spi() {
    // configure + one phase word: 45° → 512
    let (spi_txns, fsync_txns) = expectations(&[0xC000 | 512]);
    let mut spi = SpiMock::new(&spi_txns);
    let mut fsync = PinMock::new(&fsync_txns);

    let mut transport = SpiTransport::new(spi.clone(), fsync.clone());
    transport.configure().unwrap();
    transport
        .write_word(Channel::Ch0.phase_selector() | 512)
        .unwrap();

    spi.done();
    fsync.done();
}

#[test]
fn fsync_failure_is_reported_as_pin_error() {
    let mut spi = SpiMock::new(&[]);
    let mut fsync = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low).with_error(MockError::Io(std::io::ErrorKind::Other)),
    ]);

    let transport = SpiTransport::new(spi.clone(), fsync.clone());
    let mut dds = Ad9833::new(transport, DriverConfig::default()).unwrap();
    let result = dds.initialize();

    assert!(matches!(
        result,
        Err(Error::Transport(SpiTransportError::Pin(_)))
    ));
    assert!(!dds.is_initialized());

    spi.done();
    fsync.done();
}

#[test]
fn flush_failure_still_raises_fsync() {
    let mut fsync = fsync_one_frame();

    let mut transport = SpiTransport::new(FlushFails, fsync.clone());
    transport.configure().unwrap();
    let result = transport.write_word(0x2100);

    assert!(matches!(result, Err(SpiTransportError::Spi(ErrorKind::Other))));
    // The final set_high is part of the expectations.
    fsync.done();
}

#[test]
fn failed_initialize_leaves_fsync_high() {
    let mut fsync = fsync_one_frame();

    let transport = SpiTransport::new(FlushFails, fsync.clone());
    let mut dds = Ad9833::new(transport, DriverConfig::default()).unwrap();

    assert!(matches!(
        dds.initialize(),
        Err(Error::Transport(SpiTransportError::Spi(ErrorKind::Other)))
    ));
    assert!(!dds.is_initialized());
    fsync.done();
}
