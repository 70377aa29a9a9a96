//! HD44780 Character LCD Driver
//!
//! A driver for HD44780-compatible character LCDs (16x2, 20x4 and friends),
//! plus the "Hello, World" demo sequence that exercises it.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - 8-bit and 4-bit parallel GPIO buses
//! - PCF8574 I2C backpack support
//! - Custom glyphs (CGRAM) with named characters
//! - Backlight control
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use alcd::{Builder, CustomChar, Dimensions, Display, ParallelInterface};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (rs, en, bl) = (MockPin, MockPin, MockPin);
//! # let data = [MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin, MockPin];
//! # let mut delay = MockDelay;
//! let interface = ParallelInterface::new_8bit(rs, en, bl, data);
//! let dims = match Dimensions::new(16, 2) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//! let _ = display.define_custom(CustomChar::Heart, &mut delay);
//! let _ = display.set_cursor(0, 1, &mut delay);
//! let _ = display.write_str("I ", &mut delay);
//! let _ = display.write_custom(CustomChar::Heart, &mut delay);
//! let _ = display.write_str(" Rust", &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// PCF8574 I2C backpack interface
pub mod backpack;
/// HD44780 instruction definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// "Hello, World" demo sequence
pub mod demo;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Custom character bitmaps
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;

#[cfg(test)]
mod mock;

pub use backpack::{BackpackError, DEFAULT_ADDRESS, I2cBackpack};
pub use config::{Builder, Config, Dimensions, Font, MAX_CELLS, MAX_COLS, MAX_ROWS};
pub use display::{Display, Position};
pub use error::{BuilderError, Error, GlyphError};
pub use glyph::{CustomChar, Glyph};
pub use interface::{BusWidth, DisplayInterface, InterfaceError, ParallelInterface};
