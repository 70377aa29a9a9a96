//! PCF8574 I2C backpack interface
//!
//! Many character LCD modules ship with a PCF8574 8-bit I/O expander
//! soldered to the back. The controller then runs in 4-bit mode with the
//! expander's port wired as:
//!
//! | Bit | Signal |
//! |-----|--------|
//! | P0  | RS     |
//! | P1  | R/W    |
//! | P2  | EN     |
//! | P3  | Backlight |
//! | P4-P7 | D4-D7 |
//!
//! Every nibble is written twice, once with EN high and once with EN low.

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::command::{WAKE_UP, WAKE_UP_4BIT, is_slow};
use crate::interface::{
    BusWidth, DisplayInterface, ENABLE_PULSE_US, EXECUTION_DELAY_US, POWER_ON_DELAY_MS,
    SLOW_EXECUTION_DELAY_US, WAKE_UP_DELAY_US, WAKE_UP_FIRST_DELAY_US,
};

/// Default 7-bit address of a PCF8574 with A0-A2 pulled high
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// Errors that can occur on the I2C backpack
#[derive(Debug)]
pub enum BackpackError<I2cErr> {
    /// I2C bus error
    I2c(I2cErr),
}

impl<I2cErr: Debug> core::fmt::Display for BackpackError<I2cErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
        }
    }
}

impl<I2cErr: Debug> core::error::Error for BackpackError<I2cErr> {}

/// HD44780 behind a PCF8574 I/O expander
pub struct I2cBackpack<I2C> {
    i2c: I2C,
    address: u8,
    /// Backlight bit ORed into every port write
    backlight: u8,
}

impl<I2C: I2c> I2cBackpack<I2C> {
    /// Create a backpack interface at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a backpack interface at a specific 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            backlight: 0,
        }
    }

    /// Get the I2C address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_port(&mut self, value: u8) -> Result<(), BackpackError<I2C::Error>> {
        self.i2c
            .write(self.address, &[value | self.backlight])
            .map_err(BackpackError::I2c)
    }

    /// Latch one nibble; `rs` is either 0 or [`RS`]
    fn write_nibble<D: DelayNs>(
        &mut self,
        nibble: u8,
        rs: u8,
        delay: &mut D,
    ) -> Result<(), BackpackError<I2C::Error>> {
        let port = (nibble << 4) | rs;
        self.write_port(port | EN)?;
        delay.delay_us(ENABLE_PULSE_US);
        self.write_port(port)
    }

    fn write_byte<D: DelayNs>(
        &mut self,
        byte: u8,
        rs: u8,
        delay: &mut D,
    ) -> Result<(), BackpackError<I2C::Error>> {
        self.write_nibble(byte >> 4, rs, delay)?;
        self.write_nibble(byte & 0x0F, rs, delay)
    }
}

impl<I2C> DisplayInterface for I2cBackpack<I2C>
where
    I2C: I2c,
{
    type Error = BackpackError<I2C::Error>;

    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        self.write_port(0)?;
        delay.delay_ms(POWER_ON_DELAY_MS);

        self.write_nibble(WAKE_UP, 0, delay)?;
        delay.delay_us(WAKE_UP_FIRST_DELAY_US);
        self.write_nibble(WAKE_UP, 0, delay)?;
        delay.delay_us(WAKE_UP_DELAY_US);
        self.write_nibble(WAKE_UP, 0, delay)?;
        delay.delay_us(WAKE_UP_DELAY_US);
        self.write_nibble(WAKE_UP_4BIT, 0, delay)?;
        delay.delay_us(WAKE_UP_DELAY_US);
        Ok(())
    }

    fn send_command<D: DelayNs>(&mut self, command: u8, delay: &mut D) -> Result<(), Self::Error> {
        self.write_byte(command, 0, delay)?;
        if is_slow(command) {
            delay.delay_us(SLOW_EXECUTION_DELAY_US);
        } else {
            delay.delay_us(EXECUTION_DELAY_US);
        }
        Ok(())
    }

    fn send_data<D: DelayNs>(&mut self, data: &[u8], delay: &mut D) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte, RS, delay)?;
            delay.delay_us(EXECUTION_DELAY_US);
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        self.backlight = if on { BACKLIGHT } else { 0 };
        self.write_port(0)
    }

    fn bus_width(&self) -> BusWidth {
        BusWidth::FourBit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDelay;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    #[derive(Debug, PartialEq)]
    struct MockI2cError;

    impl embedded_hal::i2c::Error for MockI2cError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockI2c {
        type Error = MockI2cError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockI2cError);
            }
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn port_values(backpack: &I2cBackpack<MockI2c>) -> Vec<u8> {
        backpack.i2c.writes.iter().map(|(_, bytes)| bytes[0]).collect()
    }

    #[test]
    fn test_data_byte_is_two_strobed_nibbles() {
        let mut backpack = I2cBackpack::new(MockI2c::default());
        let mut delay = MockDelay::new();
        backpack.send_data(b"A", &mut delay).unwrap();

        // 'A' = 0x41: high nibble 4, low nibble 1, RS set
        assert_eq!(port_values(&backpack), alloc::vec![0x45, 0x41, 0x15, 0x11]);
        assert!(
            backpack
                .i2c
                .writes
                .iter()
                .all(|(address, _)| *address == DEFAULT_ADDRESS)
        );
    }

    #[test]
    fn test_backlight_bit_sticks_to_later_writes() {
        let mut backpack = I2cBackpack::with_address(MockI2c::default(), 0x3F);
        let mut delay = MockDelay::new();
        backpack.set_backlight(true).unwrap();
        backpack.send_command(0x80, &mut delay).unwrap();

        assert_eq!(port_values(&backpack), alloc::vec![0x08, 0x8C, 0x88, 0x0C, 0x08]);
        assert_eq!(backpack.address(), 0x3F);
    }

    #[test]
    fn test_wake_up_selects_4bit_mode() {
        let mut backpack = I2cBackpack::new(MockI2c::default());
        let mut delay = MockDelay::new();
        backpack.initialize(&mut delay).unwrap();

        let strobed: Vec<u8> = port_values(&backpack)
            .into_iter()
            .filter(|value| value & EN != 0)
            .map(|value| value >> 4)
            .collect();
        assert_eq!(strobed, alloc::vec![0x3, 0x3, 0x3, 0x2]);
        assert_eq!(backpack.bus_width(), BusWidth::FourBit);
    }

    #[test]
    fn test_i2c_error_propagates() {
        let mut backpack = I2cBackpack::new(MockI2c {
            fail: true,
            ..MockI2c::default()
        });
        assert!(matches!(
            backpack.set_backlight(true),
            Err(BackpackError::I2c(MockI2cError))
        ));
    }
}
