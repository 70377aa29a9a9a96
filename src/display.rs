//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::command::{
    BLINK_ON, CLEAR_DISPLAY, CURSOR_ON, DISPLAY_CONTROL, DISPLAY_ON, FUNCTION_SET, RETURN_HOME,
    SET_CGRAM_ADDR, SET_DDRAM_ADDR,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::glyph::{CustomChar, Glyph};
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Character written in place of anything outside ASCII
pub const REPLACEMENT_CHAR: u8 = b'?';

/// DDRAM cells the address counter cycles through
const DDRAM_CELLS: usize = 80;
/// Cells per line in two-line mode
const LINE_CELLS: u8 = 40;
/// DDRAM address of the second line in two-line mode
const SECOND_LINE: u8 = 0x40;

/// Cursor position in character cells, 0-based
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Column
    pub col: u8,
    /// Row
    pub row: u8,
}

impl Position {
    /// Create a new position
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

/// Flags of the DISPLAY CONTROL instruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ControlFlags {
    display_on: bool,
    cursor_visible: bool,
    cursor_blink: bool,
}

impl ControlFlags {
    fn command(self) -> u8 {
        let mut command = DISPLAY_CONTROL;
        if self.display_on {
            command |= DISPLAY_ON;
        }
        if self.cursor_visible {
            command |= CURSOR_ON;
        }
        if self.cursor_blink {
            command |= BLINK_ON;
        }
        command
    }
}

/// Core display driver for HD44780-compatible character LCDs
///
/// The driver never reads the controller back. It mirrors the DDRAM address
/// counter and the display control flags itself, updating them only once the
/// bus has accepted the instruction, so they stay correct as long as every
/// write goes through this struct.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// DDRAM address the next character lands at
    address: u8,
    /// Whether the backlight is on
    backlight_on: bool,
    /// Last DISPLAY CONTROL flags sent
    control: ControlFlags,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        let control = ControlFlags {
            display_on: false,
            cursor_visible: config.cursor_visible,
            cursor_blink: config.cursor_blink,
        };
        Self {
            interface,
            config,
            address: 0,
            backlight_on: false,
            control,
        }
    }

    /// Wake the controller and apply the configuration
    ///
    /// Leaves the screen cleared with the cursor at (0, 0).
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!(
            "initializing {}x{} display ({:?} bus)",
            self.config.dimensions.cols,
            self.config.dimensions.rows,
            self.interface.bus_width()
        );
        self.interface.initialize(delay).map_err(Error::Interface)?;

        let function_set = FUNCTION_SET
            | self.interface.bus_width().function_set_flag()
            | self.config.function_set_flags();
        self.send_command(function_set, delay)?;

        // Display off while the rest is configured
        self.apply_display_control(ControlFlags::default(), delay)?;

        self.clear(delay)?;

        let entry_mode = self.config.entry_mode_command();
        self.send_command(entry_mode, delay)?;

        let control = ControlFlags {
            display_on: true,
            cursor_visible: self.config.cursor_visible,
            cursor_blink: self.config.cursor_blink,
        };
        self.apply_display_control(control, delay)?;

        self.set_backlight(self.config.backlight_on_init)?;

        Ok(())
    }

    /// Blank the screen and move the cursor to (0, 0)
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_command(CLEAR_DISPLAY, delay)?;
        self.address = 0;
        Ok(())
    }

    /// Move the cursor to (0, 0) and undo any display shift
    pub fn home<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_command(RETURN_HOME, delay)?;
        self.address = 0;
        Ok(())
    }

    /// Move the cursor to `(col, row)`
    ///
    /// # Errors
    ///
    /// Returns `Error::CursorOutOfBounds` if the cell is outside the
    /// configured dimensions.
    pub fn set_cursor<D: DelayNs>(&mut self, col: u8, row: u8, delay: &mut D) -> DisplayResult<I> {
        if !self.config.dimensions.contains(col, row) {
            return Err(Error::CursorOutOfBounds { col, row });
        }
        let address = self.address_of(Position::new(col, row));
        trace!("cursor -> ({col}, {row}) at {address:#04x}");
        self.send_command(SET_DDRAM_ADDR | address, delay)?;
        self.address = address;
        Ok(())
    }

    /// Write text at the cursor
    ///
    /// ASCII characters are sent as-is; anything else is written as
    /// [`REPLACEMENT_CHAR`]. Text running past the last column continues
    /// into off-screen DDRAM rather than onto the next visible row.
    pub fn write_str<D: DelayNs>(&mut self, text: &str, delay: &mut D) -> DisplayResult<I> {
        let mut chunk = [0u8; 16];
        let mut len = 0;
        for c in text.chars() {
            chunk[len] = if c.is_ascii() { c as u8 } else { REPLACEMENT_CHAR };
            len += 1;
            if len == chunk.len() {
                self.write_bytes(&chunk[..len], delay)?;
                len = 0;
            }
        }
        if len > 0 {
            self.write_bytes(&chunk[..len], delay)?;
        }
        Ok(())
    }

    /// Write one raw character code at the cursor
    ///
    /// Codes 0-7 render the custom glyphs registered with
    /// [`define_glyph`](Self::define_glyph).
    pub fn write_char<D: DelayNs>(&mut self, code: u8, delay: &mut D) -> DisplayResult<I> {
        self.write_bytes(&[code], delay)
    }

    /// Write a named custom character at the cursor
    pub fn write_custom<D: DelayNs>(&mut self, ch: CustomChar, delay: &mut D) -> DisplayResult<I> {
        self.write_char(ch.slot(), delay)
    }

    /// Store a glyph bitmap in a CGRAM slot
    ///
    /// The cursor is restored afterwards, so text writes continue where
    /// they left off.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGlyphSlot` if `slot` is not below the
    /// configured font's slot count.
    pub fn define_glyph<D: DelayNs>(
        &mut self,
        slot: u8,
        glyph: &Glyph,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let max = self.config.font.glyph_slots();
        if slot >= max {
            return Err(Error::InvalidGlyphSlot { slot, max });
        }
        debug!("defining glyph in slot {slot}");
        self.send_command(SET_CGRAM_ADDR | (slot << 3), delay)?;
        self.send_data(glyph.rows(), delay)?;
        // Writes go to CGRAM until a DDRAM address is set again
        self.send_command(SET_DDRAM_ADDR | self.address, delay)
    }

    /// Register a named custom character in its own slot
    pub fn define_custom<D: DelayNs>(&mut self, ch: CustomChar, delay: &mut D) -> DisplayResult<I> {
        self.define_glyph(ch.slot(), &ch.glyph(), delay)
    }

    /// Switch the backlight on or off
    pub fn set_backlight(&mut self, on: bool) -> DisplayResult<I> {
        trace!("backlight {}", if on { "on" } else { "off" });
        self.interface
            .set_backlight(on)
            .map_err(Error::Interface)?;
        self.backlight_on = on;
        Ok(())
    }

    /// Whether the backlight is on
    pub fn is_backlight_on(&self) -> bool {
        self.backlight_on
    }

    /// Show or hide the text without touching DDRAM
    pub fn set_display_on<D: DelayNs>(&mut self, on: bool, delay: &mut D) -> DisplayResult<I> {
        let control = ControlFlags {
            display_on: on,
            ..self.control
        };
        self.apply_display_control(control, delay)
    }

    /// Show or hide the underline cursor
    pub fn set_cursor_visible<D: DelayNs>(&mut self, on: bool, delay: &mut D) -> DisplayResult<I> {
        let control = ControlFlags {
            cursor_visible: on,
            ..self.control
        };
        self.apply_display_control(control, delay)
    }

    /// Enable or disable the blinking block cursor
    pub fn set_cursor_blink<D: DelayNs>(&mut self, on: bool, delay: &mut D) -> DisplayResult<I> {
        let control = ControlFlags {
            cursor_blink: on,
            ..self.control
        };
        self.apply_display_control(control, delay)
    }

    /// Whether the text is shown
    pub fn is_display_on(&self) -> bool {
        self.control.display_on
    }

    /// Whether the underline cursor is shown
    pub fn is_cursor_visible(&self) -> bool {
        self.control.cursor_visible
    }

    /// Whether the block cursor blinks
    pub fn is_cursor_blinking(&self) -> bool {
        self.control.cursor_blink
    }

    /// Current cursor position as tracked by the driver
    ///
    /// Past the last visible column the column keeps counting through
    /// off-screen DDRAM. At the end of a DDRAM line the position moves to the
    /// start of the next line, and the last line wraps back to (0, 0), the
    /// same way the controller's address counter does. In decrement mode the
    /// walk runs backwards.
    pub fn cursor(&self) -> Position {
        self.position_of(self.address)
    }

    /// Get the display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the display dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    fn write_bytes<D: DelayNs>(&mut self, bytes: &[u8], delay: &mut D) -> DisplayResult<I> {
        self.send_data(bytes, delay)?;
        self.address = self.advance(self.address, bytes.len());
        Ok(())
    }

    fn apply_display_control<D: DelayNs>(
        &mut self,
        control: ControlFlags,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.send_command(control.command(), delay)?;
        self.control = control;
        Ok(())
    }

    fn two_line(&self) -> bool {
        self.config.dimensions.rows > 1
    }

    fn address_of(&self, pos: Position) -> u8 {
        let offsets = self.config.dimensions.row_offsets();
        offsets[usize::from(pos.row) % offsets.len()].wrapping_add(pos.col) & 0x7F
    }

    /// Inverse of `address_of`, extended to off-screen cells
    fn position_of(&self, address: u8) -> Position {
        let Dimensions { cols, rows } = self.config.dimensions;
        if !self.two_line() {
            return Position::new(address, 0);
        }
        let (line, offset) = if address >= SECOND_LINE {
            (1, address - SECOND_LINE)
        } else {
            (0, address)
        };
        if rows > 2 && offset >= cols {
            Position::new(offset - cols, line + 2)
        } else {
            Position::new(offset, line)
        }
    }

    /// Address the counter holds after `count` data writes from `address`
    ///
    /// One-line mode runs 0x00..=0x4F. Two-line mode runs 0x00..=0x27 then
    /// 0x40..=0x67.
    fn advance(&self, address: u8, count: usize) -> u8 {
        let two_line = self.two_line();
        let index = if two_line && address >= SECOND_LINE {
            usize::from(address - SECOND_LINE + LINE_CELLS)
        } else {
            usize::from(address)
        };
        let count = count % DDRAM_CELLS;
        let index = if self.config.entry_increment {
            (index + count) % DDRAM_CELLS
        } else {
            (index + DDRAM_CELLS - count) % DDRAM_CELLS
        };
        let index = index as u8;
        if two_line && index >= LINE_CELLS {
            index - LINE_CELLS + SECOND_LINE
        } else {
            index
        }
    }

    fn send_command<D: DelayNs>(&mut self, command: u8, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .send_command(command, delay)
            .map_err(Error::Interface)
    }

    fn send_data<D: DelayNs>(&mut self, data: &[u8], delay: &mut D) -> DisplayResult<I> {
        self.interface
            .send_data(data, delay)
            .map_err(Error::Interface)
    }
}
