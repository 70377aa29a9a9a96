//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! glyph construction ([`GlyphError`]) and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`GlyphError`] - Glyph rows wider than the 5-dot cell
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) and
//!   [`BackpackError`](crate::backpack::BackpackError) - Low-level bus errors
//!
//! ## Example
//!
//! ```
//! use alcd::{Builder, BuilderError, Dimensions, Glyph};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(41, 2); // Too wide
//! assert!(result.is_err());
//!
//! // Row with bits above the 5-dot cell
//! assert!(Glyph::try_new([0x20, 0, 0, 0, 0, 0, 0, 0]).is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum rows addressable by an HD44780 controller
pub const MAX_ROWS: u8 = 4;

/// Maximum columns of a single HD44780 line
pub const MAX_COLS: u8 = 40;

/// Maximum character cells (DDRAM capacity) of an HD44780 controller
pub const MAX_CELLS: u16 = 80;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (GPIO/I2C)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Cursor position outside the configured dimensions
    CursorOutOfBounds {
        /// Requested column
        col: u8,
        /// Requested row
        row: u8,
    },
    /// Glyph slot not available for the configured font
    ///
    /// 5x8 fonts have 8 slots, 5x10 fonts have 4.
    InvalidGlyphSlot {
        /// Requested slot
        slot: u8,
        /// Number of slots available
        max: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::CursorOutOfBounds { col, row } => {
                write!(f, "Cursor out of bounds: col={col}, row={row}")
            }
            Self::InvalidGlyphSlot { slot, max } => {
                write!(f, "Invalid glyph slot {slot} (only {max} available)")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of columns requested
        cols: u8,
        /// Number of rows requested
        rows: u8,
    },
    /// 5x10 font requested for a multi-line panel
    FontNeedsSingleLine {
        /// Number of rows configured
        rows: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { cols, rows } => write!(
                f,
                "Invalid dimensions {cols}x{rows} (max {MAX_COLS} columns, {MAX_ROWS} rows, {MAX_CELLS} cells)"
            ),
            Self::FontNeedsSingleLine { rows } => {
                write!(f, "5x10 font requires a single-line panel, got {rows} rows")
            }
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when constructing a glyph
#[derive(Debug, PartialEq, Eq)]
pub enum GlyphError {
    /// A row sets bits above the 5-dot cell width
    RowTooWide {
        /// Row index (0 = top)
        row: usize,
        /// Offending row value
        value: u8,
    },
}

impl core::fmt::Display for GlyphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RowTooWide { row, value } => {
                write!(f, "Glyph row {row} is wider than 5 dots: {value:#04x}")
            }
        }
    }
}

impl core::error::Error for GlyphError {}
