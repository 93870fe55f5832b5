//! GPIO indicator LEDs
//!
//! Each LED is a single output pin, active-high or active-low depending on
//! how the board wires it.

use heapless::Vec;
use maison_hal::{GpioPort, HalError, LedId, LedMode, LedService, PinDirection, PinId, Pull};

/// One LED output
#[derive(Debug, Clone, Copy)]
pub struct GpioLed {
    id: LedId,
    pin: PinId,
    /// If true, LED on = pin LOW
    inverted: bool,
    mode: LedMode,
    /// Current logical state (true = lit)
    lit: bool,
    /// Time of the last blink toggle
    toggled_at_ms: u32,
}

impl GpioLed {
    /// Create an LED record, initially off
    pub fn new(id: LedId, pin: PinId, inverted: bool) -> Self {
        Self {
            id,
            pin,
            inverted,
            mode: LedMode::Off,
            lit: false,
            toggled_at_ms: 0,
        }
    }

    pub fn id(&self) -> LedId {
        self.id
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn drive<G: GpioPort>(&mut self, gpio: &mut G, lit: bool) {
        self.lit = lit;

        if lit != self.inverted {
            // Normal: lit=true, inverted=false → high
            // Inverted: lit=true, inverted=true → low
            gpio.set_high(self.pin);
        } else {
            gpio.set_low(self.pin);
        }
    }
}

/// Fixed-capacity set of indicator LEDs sharing one GPIO port
pub struct LedBank<G, const N: usize> {
    gpio: G,
    inverted: bool,
    leds: Vec<GpioLed, N>,
    now_ms: u32,
}

impl<G: GpioPort, const N: usize> LedBank<G, N> {
    /// Create an empty bank
    ///
    /// # Arguments
    /// - `gpio`: Port the LED pins are on
    /// - `inverted`: If true, LEDs are ON when the pin is LOW
    pub const fn new(gpio: G, inverted: bool) -> Self {
        Self {
            gpio,
            inverted,
            leds: Vec::new(),
            now_ms: 0,
        }
    }

    /// Create a bank of active-high LEDs
    pub const fn new_active_high(gpio: G) -> Self {
        Self::new(gpio, false)
    }

    /// Create a bank of active-low LEDs
    pub const fn new_active_low(gpio: G) -> Self {
        Self::new(gpio, true)
    }

    /// Look up a registered LED
    pub fn get(&self, id: LedId) -> Option<&GpioLed> {
        self.leds.iter().find(|led| led.id == id)
    }

    /// Advance blinking LEDs to `now_ms`
    pub fn poll(&mut self, now_ms: u32) {
        self.now_ms = now_ms;

        for led in self.leds.iter_mut() {
            if let LedMode::Blink { half_period_ms } = led.mode {
                if now_ms.wrapping_sub(led.toggled_at_ms) >= u32::from(half_period_ms) {
                    led.toggled_at_ms = now_ms;
                    led.drive(&mut self.gpio, !led.lit);
                }
            }
        }
    }

    fn index_of(&self, id: LedId) -> Option<usize> {
        self.leds.iter().position(|led| led.id == id)
    }
}

impl<G: GpioPort, const N: usize> LedService for LedBank<G, N> {
    fn add_led(&mut self, id: LedId, pin: PinId) -> Result<(), HalError> {
        if self.leds.iter().any(|led| led.pin == pin && led.id != id) {
            return Err(HalError::PinInUse(pin));
        }

        // Already there: keep its current mode
        if self.get(id).is_some_and(|led| led.pin == pin) {
            return Ok(());
        }

        self.gpio.configure(pin, Pull::None, PinDirection::Output)?;

        let mut led = GpioLed::new(id, pin, self.inverted);
        led.drive(&mut self.gpio, false);

        // Registering an id again moves it to the new pin
        match self.index_of(id) {
            Some(index) => self.leds[index] = led,
            None => self.leds.push(led).map_err(|_| HalError::NoFreeSlot)?,
        }
        Ok(())
    }

    fn set(&mut self, id: LedId, mode: LedMode) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let now_ms = self.now_ms;
        let led = &mut self.leds[index];

        led.mode = mode;
        led.toggled_at_ms = now_ms;
        let lit = !matches!(mode, LedMode::Off);
        led.drive(&mut self.gpio, lit);
    }

    fn toggle(&mut self, id: LedId) {
        if let Some(lit) = self.get(id).map(GpioLed::is_lit) {
            self.set(id, if lit { LedMode::Off } else { LedMode::On });
        }
    }
}
