//! Board services
//!
//! Indicator LEDs and the network button belong to the board, not to the
//! object. They live in statics behind blocking mutexes; objects reach
//! them through the [`BoardLeds`] and [`BoardButtons`] handles, and
//! [`services_task`] polls them.

use core::cell::RefCell;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker};

use maison_core::config::SliderPins;
use maison_drivers::service::{ButtonBank, LedBank};
use maison_hal::{
    ButtonCallbacks, ButtonId, ButtonService, HalError, LedId, LedMode, LedService, PinId,
};
use maison_hal_nrf52::NrfGpio;

/// Service poll interval in milliseconds
pub const SERVICE_INTERVAL_MS: u64 = 10;

static LEDS: Mutex<CriticalSectionRawMutex, RefCell<LedBank<NrfGpio, 2>>> =
    Mutex::new(RefCell::new(LedBank::new_active_high(NrfGpio::new())));

static BUTTONS: Mutex<CriticalSectionRawMutex, RefCell<ButtonBank<NrfGpio, 1>>> =
    Mutex::new(RefCell::new(ButtonBank::new(NrfGpio::new())));

/// Handle onto the board LED bank
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardLeds;

impl LedService for BoardLeds {
    fn add_led(&mut self, id: LedId, pin: PinId) -> Result<(), HalError> {
        LEDS.lock(|leds| leds.borrow_mut().add_led(id, pin))
    }

    fn set(&mut self, id: LedId, mode: LedMode) {
        LEDS.lock(|leds| leds.borrow_mut().set(id, mode));
    }

    fn toggle(&mut self, id: LedId) {
        LEDS.lock(|leds| leds.borrow_mut().toggle(id));
    }
}

/// Handle onto the board button bank
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardButtons;

impl ButtonService for BoardButtons {
    fn add_button(
        &mut self,
        id: ButtonId,
        pin: PinId,
        active_low: bool,
        callbacks: ButtonCallbacks,
    ) -> Result<(), HalError> {
        BUTTONS.lock(|buttons| {
            buttons
                .borrow_mut()
                .add_button(id, pin, active_low, callbacks)
        })
    }
}

fn network_short_press() {
    BoardLeds.toggle(LedId::Network);
}

fn network_long_press() {
    info!("Network button long press");
}

fn network_multi_press() {
    info!("Network button pressed 5 times");
}

/// Register the board's own LEDs and network button
///
/// Objects may register the same ids again during their init; the
/// object's callbacks then replace the board defaults.
pub fn init(pins: &SliderPins) -> Result<(), HalError> {
    let mut leds = BoardLeds;
    leds.add_led(LedId::Network, pins.led_network)?;
    leds.add_led(LedId::Battery, pins.led_battery)?;
    leds.set(LedId::Battery, LedMode::On);

    BoardButtons.add_button(
        ButtonId::Network,
        pins.button_network,
        true,
        ButtonCallbacks {
            short_press: Some(network_short_press),
            long_press: Some(network_long_press),
            multi_press: Some(network_multi_press),
        },
    )?;

    info!("Board services ready");
    Ok(())
}

/// Service task - blinks LEDs and classifies button presses
#[embassy_executor::task]
pub async fn services_task() {
    info!("Services task started");

    let mut ticker = Ticker::every(Duration::from_millis(SERVICE_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;

        let now_ms = start.elapsed().as_millis() as u32;

        LEDS.lock(|leds| leds.borrow_mut().poll(now_ms));

        // Callbacks run outside the lock; they may touch the LEDs
        let events = BUTTONS.lock(|buttons| buttons.borrow_mut().poll(now_ms));
        for event in events {
            event.fire();
        }
    }
}
