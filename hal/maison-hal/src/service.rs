//! Board services shared by every object
//!
//! Indicator LEDs and the network button are owned by the board, not by
//! the object. Objects only register their pins and callbacks during init;
//! the board polls the services from its own loop.

use crate::error::HalError;
use crate::gpio::PinId;

/// Indicator LEDs present on every object board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedId {
    /// Radio link / activity
    Network,
    /// Battery status
    Battery,
}

/// LED output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    #[default]
    Off,
    On,
    /// Toggle every `half_period_ms`
    Blink { half_period_ms: u16 },
}

/// Indicator LED registration and control
pub trait LedService {
    /// Attach an LED to a pin and switch it off
    fn add_led(&mut self, id: LedId, pin: PinId) -> Result<(), HalError>;

    /// Set the output mode of a registered LED; unknown ids are ignored
    fn set(&mut self, id: LedId, mode: LedMode);

    /// Flip a registered LED between on and off
    fn toggle(&mut self, id: LedId);
}

/// Push buttons present on every object board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Network / pairing button
    Network,
}

/// Callbacks fired by the button service from the foreground loop
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonCallbacks {
    /// Released before the long-press threshold
    pub short_press: Option<fn()>,
    /// Held past the long-press threshold
    pub long_press: Option<fn()>,
    /// Several short presses in quick succession
    pub multi_press: Option<fn()>,
}

impl ButtonCallbacks {
    /// No callbacks
    pub const fn none() -> Self {
        Self {
            short_press: None,
            long_press: None,
            multi_press: None,
        }
    }

    /// Only a short-press callback
    pub const fn short(callback: fn()) -> Self {
        Self {
            short_press: Some(callback),
            long_press: None,
            multi_press: None,
        }
    }
}

/// Push button registration
pub trait ButtonService {
    /// Attach a button to a pin
    ///
    /// `active_low` buttons read low while pressed and get a pull-up.
    fn add_button(
        &mut self,
        id: ButtonId,
        pin: PinId,
        active_low: bool,
        callbacks: ButtonCallbacks,
    ) -> Result<(), HalError>;
}
