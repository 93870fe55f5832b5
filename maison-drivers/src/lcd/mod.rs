//! Character LCD drivers

mod hd44780;

pub use hd44780::{Lcd2x16, LCD_COLS, LCD_ROWS};
