//! Pin role configuration
//!
//! Associates each logical function of an object with the P0 pin it is
//! wired to. Roles are immutable once the object is built.

use heapless::Vec;
use maison_hal::PinId;

/// Pin role configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two roles share one pin
    DuplicatePin(PinId),
}

/// Character LCD bus pins (4-bit mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdPins {
    /// Enable strobe (E)
    pub enable: PinId,
    /// Read/Write select (RW), held low
    pub rw: PinId,
    /// Register select (RS): low = command, high = data
    pub rs: PinId,
    /// Data lines D4..D7, lowest bit first
    pub data: [PinId; 4],
}

impl LcdPins {
    /// Command pins followed by data pins
    pub fn all(&self) -> [PinId; 7] {
        [
            self.enable,
            self.rw,
            self.rs,
            self.data[0],
            self.data[1],
            self.data[2],
            self.data[3],
        ]
    }
}

/// Pin roles of the encoder-driven display object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliderPins {
    /// Encoder phase A (edge source)
    pub phase_a: PinId,
    /// Encoder phase B (sampled on phase A edges)
    pub phase_b: PinId,
    /// Encoder push switch, active-low
    pub switch: PinId,
    /// 5 V boost converter enable powering the LCD
    pub boost_enable: PinId,
    /// Network indicator LED
    pub led_network: PinId,
    /// Battery indicator LED
    pub led_battery: PinId,
    /// Network button, active-low
    pub button_network: PinId,
    /// LCD bus
    pub lcd: LcdPins,
}

impl SliderPins {
    /// Wiring of the reference slider board
    ///
    /// Encoder: A = P0.12, B = P0.11, switch = P0.10.
    /// LCD: E = P0.25, RW = P0.26, RS = P0.27, D7..D4 = P0.28..P0.31.
    pub const fn reference_board() -> Self {
        Self {
            phase_a: PinId::p0(12),
            phase_b: PinId::p0(11),
            switch: PinId::p0(10),
            boost_enable: PinId::p0(8),
            led_network: PinId::p0(18),
            led_battery: PinId::p0(19),
            button_network: PinId::p0(13),
            lcd: LcdPins {
                enable: PinId::p0(25),
                rw: PinId::p0(26),
                rs: PinId::p0(27),
                data: [PinId::p0(31), PinId::p0(30), PinId::p0(29), PinId::p0(28)],
            },
        }
    }

    /// Every pin used by the object
    pub fn all(&self) -> Vec<PinId, 14> {
        let mut pins = Vec::new();
        for pin in [
            self.phase_a,
            self.phase_b,
            self.switch,
            self.boost_enable,
            self.led_network,
            self.led_battery,
            self.button_network,
        ]
        .into_iter()
        .chain(self.lcd.all())
        {
            // Capacity matches the role count
            let _ = pins.push(pin);
        }
        pins
    }

    /// Check that no pin is assigned to two roles
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.all();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }
        Ok(())
    }
}

impl Default for SliderPins {
    fn default() -> Self {
        Self::reference_board()
    }
}
