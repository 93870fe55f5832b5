//! GPIO pin abstractions
//!
//! Pins are addressed by [`PinId`] rather than by owned pin types. The
//! object firmware configures a fixed set of pin roles once at init and then
//! reads and writes them by number, which is how the board wiring is
//! documented ("P0.12", "P0.25", ...).

use crate::error::HalError;

/// Number of pins on the P0 port
pub const PORT_PINS: u8 = 32;

/// Digital logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Check if the level is high (logic 1)
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if the level is low (logic 0)
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Internal pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    Input,
    Output,
}

/// Physical pin on the P0 port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(u8);

impl PinId {
    /// Create a pin id, panicking (at compile time in const context) if the
    /// number is off the port
    pub const fn p0(number: u8) -> Self {
        assert!(number < PORT_PINS, "P0 has 32 pins");
        Self(number)
    }

    /// Create a pin id, rejecting numbers off the port
    pub fn new(number: u8) -> Result<Self, HalError> {
        if number < PORT_PINS {
            Ok(Self(number))
        } else {
            Err(HalError::InvalidPin(number))
        }
    }

    /// Pin number within the port
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Single-bit mask for port-wide registers
    pub const fn mask(self) -> u32 {
        1 << self.0
    }

    /// Parse a pin from config notation
    ///
    /// Supports formats:
    /// - "P0.12" -> pin 12
    /// - "12" -> pin 12
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let number = match s.strip_prefix("P0.") {
            Some(rest) => rest,
            None if s.starts_with('P') => return None,
            None => s,
        };

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let number: u8 = number.parse().ok()?;
        Self::new(number).ok()
    }
}

impl core::fmt::Display for PinId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "P0.{:02}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "P0.{=u8}", self.0)
    }
}

/// Pin-addressed GPIO port
///
/// Implementations handle the actual register manipulation for the chip.
pub trait GpioPort {
    /// Configure direction and pull of a pin
    fn configure(&mut self, pin: PinId, pull: Pull, direction: PinDirection)
        -> Result<(), HalError>;

    /// Drive an output pin
    fn write(&mut self, pin: PinId, level: Level);

    /// Read the current input level of a pin
    fn read(&self, pin: PinId) -> Level;

    /// Drive an output pin high (logic 1)
    fn set_high(&mut self, pin: PinId) {
        self.write(pin, Level::High);
    }

    /// Drive an output pin low (logic 0)
    fn set_low(&mut self, pin: PinId) {
        self.write(pin, Level::Low);
    }
}

impl<T: GpioPort + ?Sized> GpioPort for &mut T {
    fn configure(
        &mut self,
        pin: PinId,
        pull: Pull,
        direction: PinDirection,
    ) -> Result<(), HalError> {
        (**self).configure(pin, pull, direction)
    }

    fn write(&mut self, pin: PinId, level: Level) {
        (**self).write(pin, level)
    }

    fn read(&self, pin: PinId) -> Level {
        (**self).read(pin)
    }
}

/// Read-only view of input levels, usable from interrupt context
///
/// Edge handlers receive a sampler rather than the port so they can never
/// reconfigure or drive pins.
pub trait PinSampler {
    /// Read the current input level of a pin
    fn level(&self, pin: PinId) -> Level;

    /// Check if the pin reads high
    fn is_high(&self, pin: PinId) -> bool {
        self.level(pin).is_high()
    }
}
