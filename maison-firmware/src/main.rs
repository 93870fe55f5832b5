//! Maison - Home Automation Object Firmware
//!
//! Firmware for nRF52832-based object boards. One image runs one object
//! role, chosen at build time in object.toml.
//!
//! The object is driven from a single foreground loop; pin edges arrive
//! on the GPIOTE interrupt and only touch the object's shared state.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use maison_core::objects::ObjectId;
use maison_core::slider::{LcdSlider, SliderHandlers, SliderState};
use maison_core::traits::Object;
use maison_drivers::lcd::Lcd2x16;
use maison_hal_nrf52::gpiote::{self, shared_table, GpioteEdges, SharedEdgeTable};
use maison_hal_nrf52::NrfGpio;

use crate::board::{BoardButtons, BoardLeds};
use crate::config::{OBJECT, PINS};

mod board;
mod config;

/// GPIOTE channel table, shared with the interrupt vector
static EDGES: SharedEdgeTable = shared_table();

#[interrupt]
fn GPIOTE() {
    gpiote::on_interrupt(&EDGES, &NrfGpio::new());
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Maison firmware starting...");

    let _p = embassy_nrf::init(Default::default());
    info!("My id is {}. I am \"{}\"", OBJECT.as_u8(), OBJECT.name());

    unwrap!(board::init(&PINS));

    interrupt::GPIOTE.set_priority(Priority::P3);
    // SAFETY: the vector above only touches EDGES, which is ready
    unsafe { interrupt::GPIOTE.enable() };

    spawner.spawn(board::services_task()).unwrap();

    match OBJECT {
        ObjectId::LcdSlider => run_lcd_slider().await,
        other => {
            // build.rs only accepts implemented objects
            defmt::panic!("No implementation for {}", other.name());
        }
    }
}

async fn run_lcd_slider() -> ! {
    static STATE: SliderState = SliderState::new();
    static HANDLERS: SliderHandlers<'static> = SliderHandlers::new(&STATE, &PINS);

    let display = Lcd2x16::new(NrfGpio::new(), Delay, PINS.lcd);
    let mut slider = LcdSlider::new(
        PINS,
        &HANDLERS,
        display,
        NrfGpio::new(),
        GpioteEdges::new(&EDGES, NrfGpio::new()),
        BoardLeds,
        BoardButtons,
    );

    run(&mut slider).await
}

/// Foreground loop: one object tick per iteration
async fn run<O: Object>(object: &mut O) -> ! {
    loop {
        if let Err(e) = object.process_tick() {
            error!(
                "{} failed in {}: {}",
                object.id().name(),
                object.lifecycle(),
                e
            );
            defmt::panic!("object init failed");
        }

        // Let the service task run between ticks
        yield_now().await;
    }
}
