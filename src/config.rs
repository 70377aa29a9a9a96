//! Display configuration types and builder

use crate::command::{ENTRY_INCREMENT, ENTRY_MODE_SET, ENTRY_SHIFT, FONT_5X10, TWO_LINES};
pub use crate::error::{BuilderError, MAX_CELLS, MAX_COLS, MAX_ROWS};

/// Display dimensions in character cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns (characters per line)
    pub cols: u8,
    /// Number of rows (lines)
    pub rows: u8,
}

impl Dimensions {
    /// The common 16x2 module
    pub const LCD_16X2: Self = Self { cols: 16, rows: 2 };
    /// 20x4 module
    pub const LCD_20X4: Self = Self { cols: 20, rows: 4 };

    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - cols is 0 or > MAX_COLS
    /// - rows is 0 or > MAX_ROWS
    /// - cols * rows > MAX_CELLS (DDRAM capacity)
    pub fn new(cols: u8, rows: u8) -> Result<Self, BuilderError> {
        if cols == 0 || cols > MAX_COLS || rows == 0 || rows > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        if u16::from(cols) * u16::from(rows) > MAX_CELLS {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// DDRAM address of the first cell of each row
    ///
    /// Rows 2 and 3 of 4-line panels continue lines 0 and 1.
    pub fn row_offsets(&self) -> [u8; 4] {
        [0x00, 0x40, self.cols, 0x40 + self.cols]
    }

    /// Whether `(col, row)` addresses a visible cell
    pub fn contains(&self, col: u8, row: u8) -> bool {
        col < self.cols && row < self.rows
    }
}

/// Character font
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Font {
    /// 5x8 dots, 8 custom glyph slots
    #[default]
    Dots5x8,
    /// 5x10 dots, 4 custom glyph slots (single-line panels only)
    Dots5x10,
}

impl Font {
    /// Number of CGRAM glyph slots available with this font
    pub fn glyph_slots(self) -> u8 {
        match self {
            Self::Dots5x8 => 8,
            Self::Dots5x10 => 4,
        }
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Character font
    pub font: Font,
    /// Show the underline cursor
    pub cursor_visible: bool,
    /// Blink the block cursor
    pub cursor_blink: bool,
    /// Move the cursor right after each write (left when false)
    pub entry_increment: bool,
    /// Shift the display instead of the cursor after each write
    pub entry_shift: bool,
    /// Turn the backlight on at the end of initialization
    pub backlight_on_init: bool,
}

impl Config {
    /// Line-count and font bits of the FUNCTION SET instruction
    ///
    /// The bus width bit is owned by the interface.
    pub fn function_set_flags(&self) -> u8 {
        let mut flags = 0;
        if self.dimensions.rows > 1 {
            flags |= TWO_LINES;
        }
        if self.font == Font::Dots5x10 {
            flags |= FONT_5X10;
        }
        flags
    }

    /// Full ENTRY MODE SET instruction
    pub fn entry_mode_command(&self) -> u8 {
        let mut command = ENTRY_MODE_SET;
        if self.entry_increment {
            command |= ENTRY_INCREMENT;
        }
        if self.entry_shift {
            command |= ENTRY_SHIFT;
        }
        command
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use alcd::{Builder, Dimensions, Font};
///
/// let dims = match Dimensions::new(16, 2) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).font(Font::Dots5x8).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(!config.cursor_visible);
/// ```
#[must_use]
pub struct Builder {
    dimensions: Option<Dimensions>,
    font: Font,
    cursor_visible: bool,
    cursor_blink: bool,
    entry_increment: bool,
    entry_shift: bool,
    backlight_on_init: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            font: Font::Dots5x8,
            cursor_visible: false,
            cursor_blink: false,
            // Left-to-right text, fixed display
            entry_increment: true,
            entry_shift: false,
            backlight_on_init: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set character font
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Show or hide the underline cursor
    pub fn cursor_visible(mut self, value: bool) -> Self {
        self.cursor_visible = value;
        self
    }

    /// Enable or disable the blinking block cursor
    pub fn cursor_blink(mut self, value: bool) -> Self {
        self.cursor_blink = value;
        self
    }

    /// Set cursor direction after each write
    pub fn entry_increment(mut self, value: bool) -> Self {
        self.entry_increment = value;
        self
    }

    /// Shift the display instead of the cursor after each write
    pub fn entry_shift(mut self, value: bool) -> Self {
        self.entry_shift = value;
        self
    }

    /// Turn the backlight on once initialization completes
    pub fn backlight_on_init(mut self, value: bool) -> Self {
        self.backlight_on_init = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// and `BuilderError::FontNeedsSingleLine` if the 5x10 font was chosen
    /// for a panel with more than one row.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        if self.font == Font::Dots5x10 && dimensions.rows > 1 {
            return Err(BuilderError::FontNeedsSingleLine {
                rows: dimensions.rows,
            });
        }
        Ok(Config {
            dimensions,
            font: self.font,
            cursor_visible: self.cursor_visible,
            cursor_blink: self.cursor_blink,
            entry_increment: self.entry_increment,
            entry_shift: self.entry_shift,
            backlight_on_init: self.backlight_on_init,
        })
    }
}
