//! Custom character bitmaps
//!
//! An HD44780 keeps up to eight user-defined characters in CGRAM. Each one is
//! eight rows of five dots, stored as the low five bits of one byte per row
//! (bit 4 is the leftmost dot). Writing character code `n` (for `n < 8`)
//! renders the glyph stored in slot `n`.
//!
//! ## Example
//!
//! ```
//! use alcd::{CustomChar, Glyph};
//!
//! // A hollow box
//! let glyph = Glyph::new([0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F, 0x00]);
//! assert_eq!(glyph.rows()[0], 0x1F);
//!
//! assert_eq!(CustomChar::Heart.slot(), 2);
//! ```

use crate::error::GlyphError;

/// Number of pixel rows in a glyph
pub const GLYPH_ROWS: usize = 8;

/// Mask of the dots a row can light
pub const ROW_MASK: u8 = 0x1F;

/// An 8-row, 5-dot-wide custom character bitmap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Glyph([u8; GLYPH_ROWS]);

impl Glyph {
    /// Create a glyph, discarding bits above the 5-dot cell
    pub const fn new(rows: [u8; GLYPH_ROWS]) -> Self {
        let mut masked = rows;
        let mut i = 0;
        while i < GLYPH_ROWS {
            masked[i] &= ROW_MASK;
            i += 1;
        }
        Self(masked)
    }

    /// Create a glyph, rejecting rows wider than the 5-dot cell
    ///
    /// # Errors
    ///
    /// Returns `GlyphError::RowTooWide` for the first row with bits above bit 4.
    pub fn try_new(rows: [u8; GLYPH_ROWS]) -> Result<Self, GlyphError> {
        if let Some((row, &value)) = rows
            .iter()
            .enumerate()
            .find(|&(_, value)| value & !ROW_MASK != 0)
        {
            return Err(GlyphError::RowTooWide { row, value });
        }
        Ok(Self(rows))
    }

    /// Row bytes, top to bottom
    pub const fn rows(&self) -> &[u8; GLYPH_ROWS] {
        &self.0
    }

    /// Whether the dot at `(x, y)` is lit (x = 0 is the leftmost dot)
    pub fn is_set(&self, x: u8, y: u8) -> bool {
        if x >= 5 || usize::from(y) >= GLYPH_ROWS {
            return false;
        }
        self.0[usize::from(y)] & (0x10 >> x) != 0
    }
}

/// Smiley face
pub const SMILEY: Glyph = Glyph::new([0x00, 0x00, 0x0A, 0x00, 0x11, 0x0E, 0x00, 0x00]);
/// Robot
pub const ROBOT: Glyph = Glyph::new([0x0E, 0x0E, 0x04, 0x0E, 0x15, 0x04, 0x0A, 0x0A]);
/// Heart
pub const HEART: Glyph = Glyph::new([0x00, 0x00, 0x0A, 0x15, 0x11, 0x0E, 0x04, 0x00]);
/// Clock
pub const CLOCK: Glyph = Glyph::new([0x00, 0x15, 0x15, 0x1F, 0x10, 0x10, 0x10, 0x00]);

/// Named custom characters and the CGRAM slot each one lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CustomChar {
    /// Slot 0
    Smiley = 0,
    /// Slot 1
    Robot = 1,
    /// Slot 2
    Heart = 2,
    /// Slot 3
    Clock = 3,
}

impl CustomChar {
    /// All custom characters in slot order
    pub const ALL: [Self; 4] = [Self::Smiley, Self::Robot, Self::Heart, Self::Clock];

    /// CGRAM slot, which is also the character code that renders it
    pub const fn slot(self) -> u8 {
        self as u8
    }

    /// Bitmap registered in this character's slot
    pub const fn glyph(self) -> Glyph {
        match self {
            Self::Smiley => SMILEY,
            Self::Robot => ROBOT,
            Self::Heart => HEART,
            Self::Clock => CLOCK,
        }
    }
}
