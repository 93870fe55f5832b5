//! P0 port access by pin id

use embassy_nrf::pac;
use embassy_nrf::pac::gpio::vals;
use maison_hal::{GpioPort, HalError, Level, PinDirection, PinId, PinSampler, Pull};

/// Handle to the P0 port
///
/// Zero-sized and `Copy`: the display driver, the services and the
/// interrupt vector each hold one. Writes go through OUTSET/OUTCLR so
/// concurrent holders never race on a read-modify-write of OUT.
#[derive(Debug, Clone, Copy, Default)]
pub struct NrfGpio {
    _private: (),
}

impl NrfGpio {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl GpioPort for NrfGpio {
    fn configure(
        &mut self,
        pin: PinId,
        pull: Pull,
        direction: PinDirection,
    ) -> Result<(), HalError> {
        let n = pin.number() as usize;

        pac::P0.pin_cnf(n).write(|w| {
            w.set_dir(match direction {
                PinDirection::Input => vals::Dir::INPUT,
                PinDirection::Output => vals::Dir::OUTPUT,
            });
            // Input buffer stays connected so outputs can be read back
            w.set_input(vals::Input::CONNECT);
            w.set_pull(match pull {
                Pull::None => vals::Pull::DISABLED,
                Pull::Up => vals::Pull::PULLUP,
                Pull::Down => vals::Pull::PULLDOWN,
            });
            w.set_drive(vals::Drive::S0S1);
            w.set_sense(vals::Sense::DISABLED);
        });

        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) {
        let n = pin.number() as usize;
        match level {
            Level::High => pac::P0.outset().write(|w| w.set_pin(n, true)),
            Level::Low => pac::P0.outclr().write(|w| w.set_pin(n, true)),
        }
    }

    fn read(&self, pin: PinId) -> Level {
        Level::from(pac::P0.in_().read().pin(pin.number() as usize))
    }
}

impl PinSampler for NrfGpio {
    fn level(&self, pin: PinId) -> Level {
        self.read(pin)
    }
}
