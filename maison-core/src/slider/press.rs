//! Encoder push switch

use maison_hal::{EdgeHandler, PinSampler};

use super::shared::SliderState;

/// Edge handler attached to the switch pin with a falling edge
///
/// Reports the press and counts it. The counter and redraw flag are left
/// untouched.
pub struct PressHandler<'a> {
    state: &'a SliderState,
}

impl<'a> PressHandler<'a> {
    pub const fn new(state: &'a SliderState) -> Self {
        Self { state }
    }
}

impl EdgeHandler for PressHandler<'_> {
    fn on_edge(&self, _pins: &dyn PinSampler) {
        #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
        let value = self.state.record_press();

        #[cfg(feature = "defmt")]
        defmt::info!("Switch button pressed, value {}", value);
    }
}
