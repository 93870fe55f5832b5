//! Character display trait

use core::fmt::Write;

use heapless::String;
use maison_hal::HalError;

/// Widest row any supported display has
pub const MAX_COLS: usize = 40;

/// Errors that can occur driving a character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus pin could not be configured
    Pin(HalError),
    /// Cursor position outside the display
    InvalidPosition { row: u8, col: u8 },
}

impl From<HalError> for DisplayError {
    fn from(e: HalError) -> Self {
        DisplayError::Pin(e)
    }
}

/// Text-mode character display
///
/// Calls may block for milliseconds on timed buses; they must only be made
/// from the foreground loop, never from an edge handler.
pub trait TextDisplay {
    /// Configure the bus and run the power-on sequence
    ///
    /// Must be called once before any other method.
    fn initialize(&mut self) -> Result<(), DisplayError>;

    /// Clear the screen and return the cursor home
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor for subsequent writes
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Write text at the cursor
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Display size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}

/// Helper trait for drawing whole rows
pub trait DisplayExt: TextDisplay {
    /// Write a row from column 0, padding with spaces to the full width
    ///
    /// Text longer than the row is truncated. Padding overwrites whatever
    /// a longer previous line left behind.
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let (cols, _) = self.dimensions();
        let cols = (cols as usize).min(MAX_COLS);

        let mut line: String<MAX_COLS> = String::new();
        for ch in text.chars().take(cols) {
            let _ = line.push(ch);
        }
        while line.len() < cols {
            let _ = line.push(' ');
        }

        self.set_cursor(row, 0)?;
        self.write_text(line.as_str())
    }

    /// Write a `label : value` row
    fn write_field<V: core::fmt::Display>(
        &mut self,
        row: u8,
        label: &str,
        value: V,
    ) -> Result<(), DisplayError> {
        let mut line: String<MAX_COLS> = String::new();
        // Overflow just truncates the row
        let _ = write!(line, "{} : {}", label, value);
        self.write_line(row, line.as_str())
    }
}

// Blanket implementation for all TextDisplay types
impl<T: TextDisplay + ?Sized> DisplayExt for T {}
