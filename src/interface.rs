//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the
//! [`ParallelInterface`] struct for driving an HD44780 controller directly
//! from GPIO pins. See [`I2cBackpack`](crate::backpack::I2cBackpack) for
//! modules fitted with a PCF8574 I2C expander.
//!
//! ## Hardware Requirements
//!
//! A parallel connection uses:
//! - **RS**: Register select (output, low=instruction, high=data)
//! - **EN**: Enable strobe (output, data latched on the falling edge)
//! - **BL**: Backlight switch (output, polarity configurable)
//! - **D0-D7** (8-bit mode) or **D4-D7** (4-bit mode) data lines
//!
//! R/W must be tied low; the controller is never read back, so every
//! instruction is followed by a fixed execution delay instead of a busy poll.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use alcd::{DisplayInterface, ParallelInterface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // D4..D7, lowest bit first
//! let data = [MockPin, MockPin, MockPin, MockPin];
//! let mut interface = ParallelInterface::new_4bit(MockPin, MockPin, MockPin, data);
//!
//! // Wake the controller and select 4-bit mode
//! let _ = interface.initialize(&mut delay);
//!
//! // Write "A"
//! let _ = interface.send_data(b"A", &mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::command::{DATA_LENGTH_8BIT, WAKE_UP, WAKE_UP_4BIT, is_slow};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Power-on wait before the first wake-up instruction
pub const POWER_ON_DELAY_MS: u32 = 50;
/// Wait after the first wake-up instruction
pub const WAKE_UP_FIRST_DELAY_US: u32 = 4_500;
/// Wait after the remaining wake-up instructions
pub const WAKE_UP_DELAY_US: u32 = 150;
/// Execution time allowed for ordinary instructions and data writes
pub const EXECUTION_DELAY_US: u32 = 50;
/// Execution time allowed for CLEAR DISPLAY and RETURN HOME
pub const SLOW_EXECUTION_DELAY_US: u32 = 2_000;
/// Width of the enable pulse
pub const ENABLE_PULSE_US: u32 = 1;

/// Data bus width between the host and the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusWidth {
    /// Four data lines (D4-D7), each byte sent as two nibbles
    FourBit,
    /// Eight data lines (D0-D7)
    EightBit,
}

impl BusWidth {
    /// Bus width bit of the FUNCTION SET instruction
    pub fn function_set_flag(self) -> u8 {
        match self {
            Self::FourBit => 0,
            Self::EightBit => DATA_LENGTH_8BIT,
        }
    }
}

/// Trait for hardware interface to an HD44780 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with a parallel
/// GPIO bus, an I2C expander, or a test double.
///
/// Implementations own the bus timing: every method returns only after the
/// controller has had time to execute what was sent.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Run the power-on wake-up sequence and select the bus width
    ///
    /// After this returns the controller accepts full instructions; the
    /// caller still has to send FUNCTION SET with its line and font flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus fails.
    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Send an instruction byte (RS low)
    ///
    /// # Errors
    ///
    /// Returns an error if the bus fails.
    fn send_command<D: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes (RS high) to DDRAM or CGRAM
    ///
    /// # Errors
    ///
    /// Returns an error if the bus fails.
    fn send_data<D: DelayNs>(
        &mut self,
        data: &[u8],
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error>;

    /// Switch the backlight on or off
    ///
    /// # Errors
    ///
    /// Returns an error if the bus fails.
    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error>;

    /// Data bus width used by this interface
    fn bus_width(&self) -> BusWidth;
}

/// Errors that can occur on a parallel GPIO bus
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Parallel GPIO interface for HD44780 controllers
///
/// `N` is the number of data lines: 8 for D0-D7, 4 for D4-D7. Data pins are
/// given lowest bit first.
///
/// ## Type Parameters
///
/// * `RS` - Register select pin implementing [`OutputPin`]
/// * `EN` - Enable pin implementing [`OutputPin`]
/// * `BL` - Backlight pin implementing [`OutputPin`]
/// * `D` - Data pin type implementing [`OutputPin`]
pub struct ParallelInterface<RS, EN, BL, D, const N: usize> {
    /// Register select (low=instruction, high=data)
    rs: RS,
    /// Enable strobe
    en: EN,
    /// Backlight switch
    backlight: BL,
    /// Data lines, lowest bit first
    data: [D; N],
    /// Backlight polarity (true = on when high)
    backlight_active_high: bool,
}

impl<RS, EN, BL, D> ParallelInterface<RS, EN, BL, D, 8>
where
    RS: OutputPin,
    EN: OutputPin,
    BL: OutputPin,
    D: OutputPin,
{
    /// Create an 8-bit interface from D0-D7
    pub fn new_8bit(rs: RS, en: EN, backlight: BL, data: [D; 8]) -> Self {
        Self::with_pins(rs, en, backlight, data)
    }
}

impl<RS, EN, BL, D> ParallelInterface<RS, EN, BL, D, 4>
where
    RS: OutputPin,
    EN: OutputPin,
    BL: OutputPin,
    D: OutputPin,
{
    /// Create a 4-bit interface from D4-D7
    pub fn new_4bit(rs: RS, en: EN, backlight: BL, data: [D; 4]) -> Self {
        Self::with_pins(rs, en, backlight, data)
    }
}

impl<RS, EN, BL, D, const N: usize> ParallelInterface<RS, EN, BL, D, N>
where
    RS: OutputPin,
    EN: OutputPin,
    BL: OutputPin,
    D: OutputPin,
{
    fn with_pins(rs: RS, en: EN, backlight: BL, data: [D; N]) -> Self {
        Self {
            rs,
            en,
            backlight,
            data,
            backlight_active_high: true,
        }
    }

    /// Set backlight polarity
    ///
    /// Default is active-high. Set to false when the backlight is switched
    /// through a PNP transistor or similar.
    pub fn set_backlight_active_high(&mut self, active_high: bool) -> &mut Self {
        self.backlight_active_high = active_high;
        self
    }

    /// Get backlight polarity (true = active high)
    pub fn backlight_active_high(&self) -> bool {
        self.backlight_active_high
    }

    /// Release the pins
    pub fn release(self) -> (RS, EN, BL, [D; N]) {
        (self.rs, self.en, self.backlight, self.data)
    }
}

impl<RS, EN, BL, D, PinErr, const N: usize> ParallelInterface<RS, EN, BL, D, N>
where
    RS: OutputPin<Error = PinErr>,
    EN: OutputPin<Error = PinErr>,
    BL: OutputPin<Error = PinErr>,
    D: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Put the low `N` bits of `bits` on the data lines and strobe EN
    fn write_bus<Dl: DelayNs>(
        &mut self,
        bits: u8,
        delay: &mut Dl,
    ) -> InterfaceResult<(), InterfaceError<PinErr>> {
        for (i, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(bits & (1 << i) != 0))
                .map_err(InterfaceError::Pin)?;
        }
        self.en.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_us(ENABLE_PULSE_US);
        self.en.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    /// Write a full byte, splitting it into nibbles on a 4-bit bus
    fn write_byte<Dl: DelayNs>(
        &mut self,
        byte: u8,
        delay: &mut Dl,
    ) -> InterfaceResult<(), InterfaceError<PinErr>> {
        if N == 4 {
            self.write_bus(byte >> 4, delay)?;
            self.write_bus(byte & 0x0F, delay)?;
        } else {
            self.write_bus(byte, delay)?;
        }
        Ok(())
    }

    /// Wake-up instruction as it appears on this bus
    fn wake_up_bits(&self, nibble: u8) -> u8 {
        if N == 4 { nibble } else { nibble << 4 }
    }
}

impl<RS, EN, BL, D, PinErr, const N: usize> DisplayInterface for ParallelInterface<RS, EN, BL, D, N>
where
    RS: OutputPin<Error = PinErr>,
    EN: OutputPin<Error = PinErr>,
    BL: OutputPin<Error = PinErr>,
    D: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn initialize<Dl: DelayNs>(&mut self, delay: &mut Dl) -> InterfaceResult<(), Self::Error> {
        self.en.set_low().map_err(InterfaceError::Pin)?;
        self.rs.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(POWER_ON_DELAY_MS);

        // Three wake-ups force 8-bit mode whatever state the controller is in
        let wake_up = self.wake_up_bits(WAKE_UP);
        self.write_bus(wake_up, delay)?;
        delay.delay_us(WAKE_UP_FIRST_DELAY_US);
        self.write_bus(wake_up, delay)?;
        delay.delay_us(WAKE_UP_DELAY_US);
        self.write_bus(wake_up, delay)?;
        delay.delay_us(WAKE_UP_DELAY_US);

        if N == 4 {
            self.write_bus(WAKE_UP_4BIT, delay)?;
            delay.delay_us(WAKE_UP_DELAY_US);
        }
        Ok(())
    }

    fn send_command<Dl: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut Dl,
    ) -> InterfaceResult<(), Self::Error> {
        self.rs.set_low().map_err(InterfaceError::Pin)?;
        self.write_byte(command, delay)?;
        if is_slow(command) {
            delay.delay_us(SLOW_EXECUTION_DELAY_US);
        } else {
            delay.delay_us(EXECUTION_DELAY_US);
        }
        Ok(())
    }

    fn send_data<Dl: DelayNs>(
        &mut self,
        data: &[u8],
        delay: &mut Dl,
    ) -> InterfaceResult<(), Self::Error> {
        self.rs.set_high().map_err(InterfaceError::Pin)?;
        for &byte in data {
            self.write_byte(byte, delay)?;
            delay.delay_us(EXECUTION_DELAY_US);
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error> {
        let level = PinState::from(on == self.backlight_active_high);
        self.backlight
            .set_state(level)
            .map_err(InterfaceError::Pin)
    }

    fn bus_width(&self) -> BusWidth {
        if N == 4 {
            BusWidth::FourBit
        } else {
            BusWidth::EightBit
        }
    }
}
