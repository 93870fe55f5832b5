//! GPIOTE edge channels
//!
//! Each registered edge takes one of the 8 GPIOTE channels in event mode.
//! The channel table lives in a static shared with the interrupt vector;
//! the vector copies the handler out of the table and runs it outside the
//! lock.

use core::cell::RefCell;

use embassy_nrf::pac;
use embassy_nrf::pac::gpiote::vals;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use maison_hal::{
    Edge, EdgeHandler, EdgeRegistry, EdgeTable, GpioPort, HalError, PinDirection, PinId,
    PinSampler, Pull,
};

use crate::gpio::NrfGpio;

/// Number of GPIOTE channels on the nRF52832
pub const GPIOTE_CHANNELS: usize = 8;

/// Channel table shared between registration and the interrupt vector
pub type SharedEdgeTable =
    Mutex<CriticalSectionRawMutex, RefCell<EdgeTable<'static, GPIOTE_CHANNELS>>>;

/// Create an empty shared table, for use in a `static`
pub const fn shared_table() -> SharedEdgeTable {
    Mutex::new(RefCell::new(EdgeTable::new()))
}

/// Edge registry backed by the GPIOTE peripheral
pub struct GpioteEdges {
    table: &'static SharedEdgeTable,
    gpio: NrfGpio,
}

impl GpioteEdges {
    pub fn new(table: &'static SharedEdgeTable, gpio: NrfGpio) -> Self {
        Self { table, gpio }
    }

    fn polarity(edge: Edge) -> vals::Polarity {
        match edge {
            Edge::Rising => vals::Polarity::LO_TO_HI,
            Edge::Falling => vals::Polarity::HI_TO_LO,
            Edge::Toggle => vals::Polarity::TOGGLE,
        }
    }
}

impl EdgeRegistry<'static> for GpioteEdges {
    fn register(
        &mut self,
        pin: PinId,
        edge: Edge,
        pull: Pull,
        handler: &'static dyn EdgeHandler,
    ) -> Result<usize, HalError> {
        let index = self
            .table
            .lock(|t| t.borrow_mut().attach(pin, edge, pull, handler))?;

        // Event mode overrides the direction, not the pull
        self.gpio.configure(pin, pull, PinDirection::Input)?;

        let g = pac::GPIOTE;
        g.config(index).write(|w| {
            w.set_mode(vals::Mode::EVENT);
            w.set_psel(pin.number());
            w.set_polarity(Self::polarity(edge));
        });
        g.events_in(index).write_value(0);

        #[cfg(feature = "defmt")]
        defmt::debug!("GPIOTE channel {} on {} ({})", index, pin, edge);

        Ok(index)
    }

    fn enable(&mut self, pin: PinId, enabled: bool) -> Result<(), HalError> {
        let index = self
            .table
            .lock(|t| t.borrow_mut().set_enabled(pin, enabled))?;

        let g = pac::GPIOTE;
        if enabled {
            g.events_in(index).write_value(0);
            g.intenset().write(|w| w.0 = 1 << index);
        } else {
            g.intenclr().write(|w| w.0 = 1 << index);
        }
        Ok(())
    }
}

/// Service pending GPIOTE events
///
/// Call from the GPIOTE interrupt vector. Clears every pending channel
/// event and runs the handler of each enabled channel.
pub fn on_interrupt(table: &SharedEdgeTable, pins: &dyn PinSampler) {
    let g = pac::GPIOTE;

    for index in 0..GPIOTE_CHANNELS {
        if g.events_in(index).read() == 0 {
            continue;
        }
        g.events_in(index).write_value(0);

        if let Some(handler) = table.lock(|t| t.borrow().handler_for(index)) {
            handler.on_edge(pins);
        }
    }
}
