//! Polled push buttons
//!
//! Buttons are sampled from a periodic task. A level must hold for
//! [`DEBOUNCE_MS`] before it is believed. A press held for
//! [`LONG_PRESS_MS`] is a long press and fires while still held; anything
//! released earlier is a short press, and the [`MULTI_PRESS_COUNT`]th short
//! press in a quick series is reported as a multi-press instead.

use heapless::Vec;
use maison_hal::{ButtonCallbacks, ButtonId, ButtonService, GpioPort, HalError, PinDirection, PinId, Pull};

/// Time a level must be stable before it counts
pub const DEBOUNCE_MS: u32 = 20;

/// Hold time that turns a press into a long press
pub const LONG_PRESS_MS: u32 = 500;

/// Short presses that make a multi-press
pub const MULTI_PRESS_COUNT: u8 = 5;

/// Longest gap between releases within a multi-press series
pub const MULTI_PRESS_GAP_MS: u32 = 400;

/// Press classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    Short,
    Long,
    Multi,
}

/// Debounce and press classification for one button
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    /// Debounced state (true = pressed)
    pressed: bool,
    /// Last raw sample
    raw: bool,
    raw_since_ms: u32,
    pressed_at_ms: u32,
    long_fired: bool,
    clicks: u8,
    last_release_ms: u32,
}

impl ButtonTracker {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            raw: false,
            raw_since_ms: 0,
            pressed_at_ms: 0,
            long_fired: false,
            clicks: 0,
            last_release_ms: 0,
        }
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one sample, returning a press when one completes
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<PressKind> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        }

        if self.raw != self.pressed && now_ms.wrapping_sub(self.raw_since_ms) >= DEBOUNCE_MS {
            self.pressed = self.raw;
            let at = self.raw_since_ms;

            if self.pressed {
                self.pressed_at_ms = at;
                self.long_fired = false;
                return None;
            }
            return self.released(at);
        }

        if self.pressed
            && !self.long_fired
            && now_ms.wrapping_sub(self.pressed_at_ms) >= LONG_PRESS_MS
        {
            self.long_fired = true;
            self.clicks = 0;
            return Some(PressKind::Long);
        }

        None
    }

    fn released(&mut self, at: u32) -> Option<PressKind> {
        if self.long_fired {
            return None;
        }

        if self.clicks > 0 && at.wrapping_sub(self.last_release_ms) > MULTI_PRESS_GAP_MS {
            self.clicks = 0;
        }
        self.clicks += 1;
        self.last_release_ms = at;

        if self.clicks >= MULTI_PRESS_COUNT {
            self.clicks = 0;
            Some(PressKind::Multi)
        } else {
            Some(PressKind::Short)
        }
    }
}

/// A classified press and the callback registered for it
#[derive(Debug, Clone, Copy)]
pub struct ButtonEvent {
    pub id: ButtonId,
    pub kind: PressKind,
    pub callback: Option<fn()>,
}

impl ButtonEvent {
    /// Run the registered callback, if any
    pub fn fire(&self) {
        if let Some(callback) = self.callback {
            callback();
        }
    }
}

struct ButtonSlot {
    id: ButtonId,
    pin: PinId,
    active_low: bool,
    callbacks: ButtonCallbacks,
    tracker: ButtonTracker,
}

impl ButtonSlot {
    fn callback(&self, kind: PressKind) -> Option<fn()> {
        match kind {
            PressKind::Short => self.callbacks.short_press,
            PressKind::Long => self.callbacks.long_press,
            PressKind::Multi => self.callbacks.multi_press,
        }
    }
}

/// Fixed-capacity set of polled buttons sharing one GPIO port
pub struct ButtonBank<G, const N: usize> {
    gpio: G,
    buttons: Vec<ButtonSlot, N>,
}

impl<G: GpioPort, const N: usize> ButtonBank<G, N> {
    pub const fn new(gpio: G) -> Self {
        Self {
            gpio,
            buttons: Vec::new(),
        }
    }

    /// Number of registered buttons
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Sample every button
    ///
    /// Returns the presses completed by this sample. Callbacks are not run
    /// here so the caller can release any lock around the bank first.
    pub fn poll(&mut self, now_ms: u32) -> Vec<ButtonEvent, N> {
        let mut events = Vec::new();

        for slot in self.buttons.iter_mut() {
            let level = self.gpio.read(slot.pin);
            let pressed = level.is_low() == slot.active_low;

            if let Some(kind) = slot.tracker.update(pressed, now_ms) {
                #[cfg(feature = "defmt")]
                defmt::debug!("Button {}: {}", slot.id, kind);

                // At most one event per slot per poll
                let _ = events.push(ButtonEvent {
                    id: slot.id,
                    kind,
                    callback: slot.callback(kind),
                });
            }
        }

        events
    }
}

impl<G: GpioPort, const N: usize> ButtonService for ButtonBank<G, N> {
    fn add_button(
        &mut self,
        id: ButtonId,
        pin: PinId,
        active_low: bool,
        callbacks: ButtonCallbacks,
    ) -> Result<(), HalError> {
        if self.buttons.iter().any(|b| b.pin == pin && b.id != id) {
            return Err(HalError::PinInUse(pin));
        }

        let pull = if active_low { Pull::Up } else { Pull::Down };
        self.gpio.configure(pin, pull, PinDirection::Input)?;

        let slot = ButtonSlot {
            id,
            pin,
            active_low,
            callbacks,
            tracker: ButtonTracker::new(),
        };

        // Registering an id again replaces its pin and callbacks
        match self.buttons.iter().position(|b| b.id == id) {
            Some(index) => self.buttons[index] = slot,
            None => self.buttons.push(slot).map_err(|_| HalError::NoFreeSlot)?,
        }
        Ok(())
    }
}
