//! AD9833 driver: shadow register state plus write sequencing.
//!
//! The chip cannot be read back, so [`Ad9833`] keeps the authoritative copy of
//! everything it has written. Each public operation stages the new state,
//! emits the chip's write sequence, and commits the staged state only after
//! the last write of the sequence succeeded.
//!
//! # Write sequences
//!
//! | Operation | Writes |
//! |-----------|--------|
//! | [`Ad9833::set_frequency`] | CTRL, `SEL_FREQn \| low14`, `SEL_FREQn \| high14` |
//! | [`Ad9833::set_phase`] | `SEL_PHASEn \| phase12` |
//! | [`Ad9833::set_mode`] | CTRL |
//! | [`Ad9833::set_active_frequency_channel`] | CTRL |
//! | [`Ad9833::set_active_phase_channel`] | CTRL |
//! | [`Ad9833::reset`] (hold) | CTRL with RESET |
//! | [`Ad9833::reset`] (release while held) | CTRL without RESET |
//! | [`Ad9833::reset`] (pulse) | CTRL with RESET, CTRL without RESET |
//!
//! The control word always carries B28, so the chip is in two-write mode
//! before any frequency half-word reaches it.

use crate::config::{ConfigError, DriverConfig};
use crate::control::ControlWord;
use crate::error::Error;
use crate::quantize::{
    dequantize_frequency, quantize_frequency, quantize_phase, split_frequency_word,
};
use crate::transport::Transport;
use crate::types::{Channel, Mode};

/// User-facing and register-facing view of one frequency/phase channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState {
    frequency_hz: f32,
    frequency_word: u32,
    phase_deg: f32,
    phase_word: u16,
}

impl ChannelState {
    fn new(frequency_hz: f32, phase_deg: f32, mclk_hz: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            frequency_hz,
            frequency_word: quantize_frequency(f64::from(frequency_hz), mclk_hz)
                .ok_or(ConfigError::DefaultFrequency)?,
            phase_deg,
            phase_word: quantize_phase(f64::from(phase_deg)).ok_or(ConfigError::DefaultPhase)?,
        })
    }

    /// Last requested frequency (Hz).
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// 28-bit tuning word derived from [`Self::frequency_hz`].
    pub fn frequency_word(&self) -> u32 {
        self.frequency_word
    }

    /// Last requested phase (degrees).
    pub fn phase_deg(&self) -> f32 {
        self.phase_deg
    }

    /// 12-bit phase word derived from [`Self::phase_deg`].
    pub fn phase_word(&self) -> u16 {
        self.phase_word
    }
}

/// AD9833 driver
pub struct Ad9833<T> {
    transport: T,
    config: DriverConfig,
    control: ControlWord,
    channels: [ChannelState; 2],
    mode: Mode,
    initialized: bool,
}

impl<T: Transport> Ad9833<T> {
    /// Create a driver around `transport`. No bus traffic happens until
    /// [`Self::initialize`].
    ///
    /// Both channels start out holding the configured defaults.
    pub fn new(transport: T, config: DriverConfig) -> Result<Self, Error<T::Error>> {
        config.validate()?;
        let channel = ChannelState::new(
            config.default_frequency_hz,
            config.default_phase_deg,
            config.master_clock_hz,
        )?;
        Ok(Self {
            transport,
            config,
            control: ControlWord::new(),
            channels: [channel; 2],
            mode: Mode::Sine,
            initialized: false,
        })
    }

    /// Configure the transport and run the bring-up sequence.
    ///
    /// 1. control word with B28
    /// 2. hold reset
    /// 3. default frequency into FREQ0 and FREQ1
    /// 4. default phase into PHASE0 and PHASE1
    /// 5. release reset
    /// 6. sine output, channel 0 active for frequency and phase
    ///
    /// Calling it again repeats the whole sequence from scratch. If any write
    /// fails the driver stays uninitialized and the shadow registers keep
    /// the values they had before the call.
    pub fn initialize(&mut self) -> Result<(), Error<T::Error>> {
        debug!("AD9833: initialising (MCLK {} Hz)", self.config.master_clock_hz);
        self.initialized = false;
        self.transport.configure().map_err(Error::Transport)?;

        let saved = (self.control, self.channels, self.mode);
        if let Err(e) = self.bring_up() {
            (self.control, self.channels, self.mode) = saved;
            return Err(e);
        }

        self.initialized = true;
        debug!("AD9833: initialisation complete");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Frequency
    // -----------------------------------------------------------------------

    /// Program `hz` into the frequency register of `channel`.
    ///
    /// The value is rounded to the nearest multiple of MCLK / 2^28. Negative,
    /// non-finite, and out-of-range values are rejected before any write.
    pub fn set_frequency(&mut self, channel: Channel, hz: f32) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.apply_frequency(channel, hz)
    }

    /// Last frequency (Hz) set on `channel`.
    pub fn frequency(&self, channel: Channel) -> f32 {
        self.channel(channel).frequency_hz
    }

    /// 28-bit tuning word currently loaded for `channel`.
    pub fn frequency_word(&self, channel: Channel) -> u32 {
        self.channel(channel).frequency_word
    }

    /// Frequency the chip actually synthesizes for `channel` after quantization.
    pub fn actual_frequency(&self, channel: Channel) -> f64 {
        dequantize_frequency(self.channel(channel).frequency_word, self.config.master_clock_hz)
    }

    // -----------------------------------------------------------------------
    // Phase
    // -----------------------------------------------------------------------

    /// Program a phase offset of `degrees` into the phase register of `channel`.
    ///
    /// Phase is in plain degrees and maps onto the 12-bit register as
    /// `round(degrees × 4096 / 360) mod 4096`, i.e. one LSB is 0.0879°.
    /// Values outside [0, 360) wrap. Only non-finite values are rejected.
    pub fn set_phase(&mut self, channel: Channel, degrees: f32) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.apply_phase(channel, degrees)
    }

    /// Last phase (degrees) set on `channel`, as passed to [`Self::set_phase`].
    pub fn phase(&self, channel: Channel) -> f32 {
        self.channel(channel).phase_deg
    }

    /// 12-bit phase word currently loaded for `channel`.
    pub fn phase_word(&self, channel: Channel) -> u16 {
        self.channel(channel).phase_word
    }

    // -----------------------------------------------------------------------
    // Mode and channel selection
    // -----------------------------------------------------------------------

    /// Switch the output waveform. Always exactly one control write.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.apply_mode(mode)
    }

    /// Last applied waveform mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Route `channel`'s frequency register to the phase accumulator.
    pub fn set_active_frequency_channel(&mut self, channel: Channel) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        debug!("AD9833: active frequency channel {}", channel);
        self.apply_control(self.control.with_frequency_channel(channel))
    }

    /// Channel selected by FSELECT.
    pub fn active_frequency_channel(&self) -> Channel {
        self.control.frequency_channel()
    }

    /// Route `channel`'s phase register to the phase adder.
    pub fn set_active_phase_channel(&mut self, channel: Channel) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        debug!("AD9833: active phase channel {}", channel);
        self.apply_control(self.control.with_phase_channel(channel))
    }

    /// Channel selected by PSELECT.
    pub fn active_phase_channel(&self) -> Channel {
        self.control.phase_channel()
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Assert RESET.
    ///
    /// With `hold = true` RESET stays set (one write) and the output stays
    /// parked until a later `reset(false)`. With `hold = false` a held reset
    /// is released (one write); otherwise RESET is pulsed (two writes).
    pub fn reset(&mut self, hold: bool) -> Result<(), Error<T::Error>> {
        self.ensure_initialized()?;
        self.apply_reset(hold)
    }

    /// Whether RESET is currently held.
    pub fn is_reset_held(&self) -> bool {
        self.control.reset_held()
    }

    // -----------------------------------------------------------------------
    // Introspection and teardown
    // -----------------------------------------------------------------------

    /// In-memory image of the control register.
    pub fn control_word(&self) -> ControlWord {
        self.control
    }

    /// Full state of `channel`.
    pub fn channel_state(&self, channel: Channel) -> ChannelState {
        *self.channel(channel)
    }

    /// Whether [`Self::initialize`] has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Driver configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport.
    ///
    /// Words written through it bypass the shadow registers.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Tear down the driver and hand back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    // -----------------------------------------------------------------------
    // Sequencing
    // -----------------------------------------------------------------------

    /// The 14-write bring-up. Shadow state is updated step by step;
    /// `initialize` rolls it back if any step fails.
    fn bring_up(&mut self) -> Result<(), Error<T::Error>> {
        self.apply_control(ControlWord::new())?;
        self.apply_reset(true)?;
        for channel in Channel::ALL {
            self.apply_frequency(channel, self.config.default_frequency_hz)?;
        }
        for channel in Channel::ALL {
            self.apply_phase(channel, self.config.default_phase_deg)?;
        }
        self.apply_reset(false)?;
        self.apply_mode(Mode::Sine)?;
        self.apply_control(self.control.with_frequency_channel(Channel::Ch0))?;
        self.apply_control(self.control.with_phase_channel(Channel::Ch0))
    }

    fn ensure_initialized(&self) -> Result<(), Error<T::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn channel(&self, channel: Channel) -> &ChannelState {
        match channel {
            Channel::Ch0 => &self.channels[0],
            Channel::Ch1 => &self.channels[1],
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut ChannelState {
        match channel {
            Channel::Ch0 => &mut self.channels[0],
            Channel::Ch1 => &mut self.channels[1],
        }
    }

    /// One framed 16-bit write.
    fn write(&mut self, word: u16) -> Result<(), Error<T::Error>> {
        trace!("AD9833: write {:#x}", word);
        self.transport.write_word(word).map_err(|e| {
            warn!("AD9833: write {:#x} failed, sequence aborted", word);
            Error::Transport(e)
        })
    }

    fn apply_control(&mut self, next: ControlWord) -> Result<(), Error<T::Error>> {
        self.write(next.bits())?;
        self.control = next;
        Ok(())
    }

    fn apply_frequency(&mut self, channel: Channel, hz: f32) -> Result<(), Error<T::Error>> {
        let word = quantize_frequency(f64::from(hz), self.config.master_clock_hz)
            .ok_or(Error::FrequencyOutOfRange)?;
        let (low, high) = split_frequency_word(word);
        let select = channel.freq_selector();
        debug!("AD9833: {} frequency {} Hz -> word {:#x}", channel, hz, word);

        self.write(self.control.bits())?;
        self.write(select | low)?;
        self.write(select | high)?;

        let state = self.channel_mut(channel);
        state.frequency_hz = hz;
        state.frequency_word = word;
        Ok(())
    }

    fn apply_phase(&mut self, channel: Channel, degrees: f32) -> Result<(), Error<T::Error>> {
        let word = quantize_phase(f64::from(degrees)).ok_or(Error::InvalidPhase)?;
        debug!("AD9833: {} phase {} deg -> word {:#x}", channel, degrees, word);

        self.write(channel.phase_selector() | word)?;

        let state = self.channel_mut(channel);
        state.phase_deg = degrees;
        state.phase_word = word;
        Ok(())
    }

    fn apply_mode(&mut self, mode: Mode) -> Result<(), Error<T::Error>> {
        debug!("AD9833: mode {}", mode);
        self.apply_control(self.control.with_mode(mode))?;
        self.mode = mode;
        Ok(())
    }

    fn apply_reset(&mut self, hold: bool) -> Result<(), Error<T::Error>> {
        let held = self.control.with_reset(true);
        let released = self.control.with_reset(false);
        if hold {
            debug!("AD9833: reset held");
            self.apply_control(held)
        } else if self.control.reset_held() {
            debug!("AD9833: reset released");
            self.apply_control(released)
        } else {
            debug!("AD9833: reset pulse");
            self.write(held.bits())?;
            self.apply_control(released)
        }
    }
}
