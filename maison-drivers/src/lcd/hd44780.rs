//! HD44780-compatible 2x16 LCD on a bit-banged 4-bit bus
//!
//! The controller latches the data lines on the falling edge of E. Every
//! line change is followed by the settle delay before E rises, and E is
//! held high for the pulse width. Each byte goes out as two nibbles, high
//! nibble first; RS selects command (low) or data (high). RW is tied low
//! by the driver: the busy flag is never read, fixed waits are used instead.

use maison_core::config::{LcdPins, LcdTiming};
use maison_core::traits::{DisplayError, TextDisplay};
use maison_hal::{BlockingDelay, GpioPort, Level, PinDirection, Pull};

/// Visible characters per row
pub const LCD_COLS: u8 = 16;

/// Visible rows
pub const LCD_ROWS: u8 = 2;

/// Function set, 4-bit interface (sent as a single nibble)
const FUNCTION_SET_4BIT: u8 = 0b0010;

const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
/// Display on, cursor off, blink off
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; LCD_ROWS as usize] = [0x00, 0x40];

/// 2x16 character LCD driver
pub struct Lcd2x16<G, D> {
    gpio: G,
    delay: D,
    pins: LcdPins,
    timing: LcdTiming,
}

impl<G: GpioPort, D: BlockingDelay> Lcd2x16<G, D> {
    /// Create a driver with the default timing
    pub fn new(gpio: G, delay: D, pins: LcdPins) -> Self {
        Self::with_timing(gpio, delay, pins, LcdTiming::default())
    }

    /// Create a driver with explicit timing
    pub fn with_timing(gpio: G, delay: D, pins: LcdPins, timing: LcdTiming) -> Self {
        Self {
            gpio,
            delay,
            pins,
            timing,
        }
    }

    /// Timing in use
    pub fn timing(&self) -> LcdTiming {
        self.timing
    }

    /// Release the bus
    pub fn release(self) -> (G, D) {
        (self.gpio, self.delay)
    }

    /// Put a nibble on D4..D7 and latch it
    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.pins.data.into_iter().enumerate() {
            self.gpio.write(pin, Level::from(nibble & (1 << bit) != 0));
        }
        self.delay.wait_ms(self.timing.settle_ms);
        self.pulse_enable();
        self.delay.wait_ms(self.timing.settle_ms);
    }

    fn pulse_enable(&mut self) {
        self.gpio.set_high(self.pins.enable);
        self.delay.wait_ms(self.timing.pulse_ms);
        self.gpio.set_low(self.pins.enable);
        self.delay.wait_ms(self.timing.pulse_ms);
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    /// Send an instruction byte (RS low)
    fn command(&mut self, cmd: u8) {
        self.write_byte(cmd);
    }

    /// Send a character byte (RS high for the duration of the byte)
    fn data(&mut self, byte: u8) {
        self.gpio.set_high(self.pins.rs);
        self.delay.wait_ms(self.timing.settle_ms);
        self.write_byte(byte);
        self.gpio.set_low(self.pins.rs);
        self.delay.wait_ms(self.timing.settle_ms);
    }
}

impl<G: GpioPort, D: BlockingDelay> TextDisplay for Lcd2x16<G, D> {
    fn initialize(&mut self) -> Result<(), DisplayError> {
        let pins = self.pins.all();

        for pin in pins {
            self.gpio
                .configure(pin, Pull::Down, PinDirection::Output)?;
        }
        for pin in pins {
            self.gpio.set_low(pin);
        }
        self.delay.wait_ms(self.timing.power_on_ms);

        // The controller powers up in 8-bit mode and takes this one nibble
        // on D7..D4 alone
        self.write_nibble(FUNCTION_SET_4BIT);
        self.command(CMD_CLEAR);
        self.command(CMD_HOME);
        self.command(CMD_DISPLAY_ON);

        self.delay.wait_ms(self.timing.power_on_ms);

        #[cfg(feature = "defmt")]
        defmt::debug!("LCD initialized");

        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR);
        self.delay.wait_ms(self.timing.clear_ms);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= LCD_ROWS || col >= LCD_COLS {
            return Err(DisplayError::InvalidPosition { row, col });
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.data(byte);
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (LCD_COLS, LCD_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::delay::DelayNs;
    use heapless::Vec;
    use maison_core::config::SliderPins;
    use maison_core::traits::DisplayExt;
    use maison_hal::{HalError, PinId};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Configure(PinId, Pull, PinDirection),
        Write(PinId, Level),
        Wait(u32),
    }

    type Log = RefCell<Vec<Op, 2048>>;

    /// GPIO port that appends every call to a shared log
    struct RecordingPort<'a> {
        log: &'a Log,
    }

    impl GpioPort for RecordingPort<'_> {
        fn configure(
            &mut self,
            pin: PinId,
            pull: Pull,
            direction: PinDirection,
        ) -> Result<(), HalError> {
            self.log
                .borrow_mut()
                .push(Op::Configure(pin, pull, direction))
                .unwrap();
            Ok(())
        }

        fn write(&mut self, pin: PinId, level: Level) {
            self.log.borrow_mut().push(Op::Write(pin, level)).unwrap();
        }

        fn read(&self, _pin: PinId) -> Level {
            Level::Low
        }
    }

    /// Delay that logs instead of waiting
    struct RecordingDelay<'a> {
        log: &'a Log,
    }

    impl DelayNs for RecordingDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.delay_ms(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Op::Wait(ms)).unwrap();
        }
    }

    fn pins() -> LcdPins {
        SliderPins::reference_board().lcd
    }

    fn lcd(log: &Log) -> Lcd2x16<RecordingPort<'_>, RecordingDelay<'_>> {
        Lcd2x16::new(RecordingPort { log }, RecordingDelay { log }, pins())
    }

    /// Replay the log through a model of the bus and return every
    /// `(rs, nibble)` latched on a falling edge of E
    fn latched(log: &[Op]) -> Vec<(bool, u8), 512> {
        let pins = pins();
        let mut levels = 0u32;
        let mut out = Vec::new();

        for op in log {
            if let Op::Write(pin, level) = *op {
                let was_high = levels & pin.mask() != 0;
                match level {
                    Level::High => levels |= pin.mask(),
                    Level::Low => levels &= !pin.mask(),
                }

                if pin == pins.enable && was_high && level == Level::Low {
                    let nibble = pins
                        .data
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| levels & p.mask() != 0)
                        .fold(0u8, |n, (bit, _)| n | (1 << bit));
                    let rs = levels & pins.rs.mask() != 0;
                    out.push((rs, nibble)).unwrap();
                }
            }
        }
        out
    }

    #[test]
    fn test_init_configures_before_first_pulse() {
        let log = Log::default();
        lcd(&log).initialize().unwrap();

        let log = log.borrow();
        let first_pulse = log
            .iter()
            .position(|op| *op == Op::Write(pins().enable, Level::High))
            .unwrap();

        for pin in pins().all() {
            let configured = log
                .iter()
                .position(|op| *op == Op::Configure(pin, Pull::Down, PinDirection::Output))
                .unwrap();
            assert!(configured < first_pulse);
        }
    }

    #[test]
    fn test_init_drives_pins_low_then_waits() {
        let log = Log::default();
        lcd(&log).initialize().unwrap();

        let log = log.borrow();
        for (i, pin) in pins().all().into_iter().enumerate() {
            assert_eq!(log[7 + i], Op::Write(pin, Level::Low));
        }
        assert_eq!(log[14], Op::Wait(40));
        assert_eq!(log.last(), Some(&Op::Wait(40)));
    }

    #[test]
    fn test_init_command_sequence() {
        let log = Log::default();
        lcd(&log).initialize().unwrap();

        let nibbles = latched(&log.borrow());
        assert_eq!(
            nibbles.as_slice(),
            &[
                (false, 0b0010),
                (false, 0x0),
                (false, 0x1),
                (false, 0x0),
                (false, 0x2),
                (false, 0x0),
                (false, 0xC),
            ]
        );
    }

    #[test]
    fn test_settle_before_every_pulse() {
        let log = Log::default();
        let mut lcd = lcd(&log);
        lcd.initialize().unwrap();
        lcd.write_line(0, "Value : 17").unwrap();
        lcd.set_cursor(1, 4).unwrap();
        lcd.write_text("ok").unwrap();

        let log = log.borrow();
        let enable = pins().enable;
        let mut pulses = 0;

        for (i, op) in log.iter().enumerate() {
            if *op != Op::Write(enable, Level::High) {
                continue;
            }
            pulses += 1;

            // Settle wait between the last line change and E rising
            let last_change = log[..i]
                .iter()
                .rposition(|op| matches!(op, Op::Write(pin, _) if *pin != enable))
                .unwrap();
            assert!(log[last_change..i].contains(&Op::Wait(5)));

            // E held high for the pulse width
            assert_eq!(log[i + 1], Op::Wait(1));
            assert_eq!(log[i + 2], Op::Write(enable, Level::Low));
        }

        assert!(pulses > 0);
    }

    #[test]
    fn test_write_text_sends_data_bytes() {
        let log = Log::default();
        let mut lcd = lcd(&log);
        lcd.initialize().unwrap();
        log.borrow_mut().clear();

        lcd.write_text("HI").unwrap();

        let nibbles = latched(&log.borrow());
        assert_eq!(
            nibbles.as_slice(),
            &[(true, 0x4), (true, 0x8), (true, 0x4), (true, 0x9)]
        );

        // RS returns low after the last byte
        let log = log.borrow();
        assert_eq!(log[log.len() - 2], Op::Write(pins().rs, Level::Low));
    }

    #[test]
    fn test_set_cursor_addresses() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        lcd.set_cursor(0, 0).unwrap();
        lcd.set_cursor(1, 3).unwrap();
        lcd.set_cursor(1, 15).unwrap();

        let nibbles = latched(&log.borrow());
        let bytes: Vec<u8, 8> = nibbles
            .chunks(2)
            .map(|pair| (pair[0].1 << 4) | pair[1].1)
            .collect();
        assert_eq!(bytes.as_slice(), &[0x80, 0xC3, 0xCF]);
    }

    #[test]
    fn test_set_cursor_out_of_range() {
        let log = Log::default();
        let mut lcd = lcd(&log);

        assert_eq!(
            lcd.set_cursor(2, 0),
            Err(DisplayError::InvalidPosition { row: 2, col: 0 })
        );
        assert_eq!(
            lcd.set_cursor(0, 16),
            Err(DisplayError::InvalidPosition { row: 0, col: 16 })
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_clear_waits() {
        let log = Log::default();
        let mut lcd = lcd(&log);
        lcd.clear().unwrap();

        assert_eq!(latched(&log.borrow()).as_slice(), &[(false, 0x0), (false, 0x1)]);
        assert_eq!(log.borrow().last(), Some(&Op::Wait(2)));
    }

    #[test]
    fn test_dimensions() {
        let log = Log::default();
        assert_eq!(lcd(&log).dimensions(), (16, 2));
    }
}
