//! HD44780 instruction definitions
//!
//! This module defines the instruction bytes used to control an
//! HD44780-compatible character LCD controller. Instructions are written with
//! the RS line low; character and glyph bytes are written with RS high.
//!
//! Most instructions are a single opcode bit ORed with flag bits, e.g.
//! `DISPLAY_CONTROL | DISPLAY_ON | CURSOR_ON`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use alcd::{command, DisplayInterface, ParallelInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let data = [MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin];
//! # let mut interface = ParallelInterface::new_8bit(MockPin, MockPin, MockPin, data);
//! // Clear the screen
//! let _ = interface.send_command(command::CLEAR_DISPLAY, &mut delay);
//!
//! // Turn the display on with a blinking cursor
//! let _ = interface.send_command(
//!     command::DISPLAY_CONTROL | command::DISPLAY_ON | command::BLINK_ON,
//!     &mut delay,
//! );
//! ```

// Basic instructions

/// Clear display (0x01)
///
/// Fills DDRAM with spaces and returns the cursor to address 0.
/// Takes up to 1.52ms to execute.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home (0x02)
///
/// Returns the cursor to address 0 and undoes any display shift.
/// Takes up to 1.52ms to execute.
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode set (0x04)
///
/// Combine with [`ENTRY_INCREMENT`] and [`ENTRY_SHIFT`].
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Move the cursor right (increment the address) after each write
pub const ENTRY_INCREMENT: u8 = 0x02;

/// Shift the whole display after each write
pub const ENTRY_SHIFT: u8 = 0x01;

/// Display on/off control (0x08)
///
/// Combine with [`DISPLAY_ON`], [`CURSOR_ON`] and [`BLINK_ON`].
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Display on flag
pub const DISPLAY_ON: u8 = 0x04;

/// Underline cursor visible flag
pub const CURSOR_ON: u8 = 0x02;

/// Blinking block cursor flag
pub const BLINK_ON: u8 = 0x01;

/// Cursor or display shift (0x10)
pub const CURSOR_SHIFT: u8 = 0x10;

/// Function set (0x20)
///
/// Combine with [`DATA_LENGTH_8BIT`], [`TWO_LINES`] and [`FONT_5X10`].
/// Bus width can only be changed during the wake-up sequence.
pub const FUNCTION_SET: u8 = 0x20;

/// 8-bit data bus flag (clear for 4-bit)
pub const DATA_LENGTH_8BIT: u8 = 0x10;

/// Two-line addressing flag (also used for 4-row panels)
pub const TWO_LINES: u8 = 0x08;

/// 5x10 dot font flag (single-line panels only)
pub const FONT_5X10: u8 = 0x04;

// Address instructions

/// Set CGRAM address (0x40)
///
/// The low 6 bits select a glyph row: `slot << 3 | row`.
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// Set DDRAM address (0x80)
///
/// The low 7 bits select a character cell.
pub const SET_DDRAM_ADDR: u8 = 0x80;

/// Wake-up nibble sent three times before the bus width is chosen
pub const WAKE_UP: u8 = 0x03;

/// Wake-up nibble that switches the controller into 4-bit mode
pub const WAKE_UP_4BIT: u8 = 0x02;

/// Returns true for instructions that need the long (1.52ms) execution time
pub const fn is_slow(command: u8) -> bool {
    command == CLEAR_DISPLAY || command == RETURN_HOME
}
