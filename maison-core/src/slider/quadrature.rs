//! Quadrature decoding on phase A edges

use maison_hal::{EdgeHandler, Level, PinId, PinSampler};

use super::shared::{SliderState, VALUE_MAX, VALUE_MIN};

/// Direction of one encoder detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Decode the direction from the phase levels sampled after an A edge
    ///
    /// B lags A when turning clockwise, so the phases differ right after
    /// the A transition.
    pub fn decode(a: Level, b: Level) -> Self {
        if a != b {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }

    /// Move a counter value one step, saturating at the bounds
    pub fn step(self, value: u8) -> u8 {
        match self {
            Rotation::Clockwise if value < VALUE_MAX => value + 1,
            Rotation::CounterClockwise if value > VALUE_MIN => value - 1,
            _ => value,
        }
    }
}

/// Edge handler attached to phase A with a toggle edge
pub struct QuadratureHandler<'a> {
    state: &'a SliderState,
    phase_a: PinId,
    phase_b: PinId,
}

impl<'a> QuadratureHandler<'a> {
    pub const fn new(state: &'a SliderState, phase_a: PinId, phase_b: PinId) -> Self {
        Self {
            state,
            phase_a,
            phase_b,
        }
    }

    /// Pin the handler is meant to be attached to
    pub fn phase_a(&self) -> PinId {
        self.phase_a
    }

    pub fn phase_b(&self) -> PinId {
        self.phase_b
    }
}

impl EdgeHandler for QuadratureHandler<'_> {
    fn on_edge(&self, pins: &dyn PinSampler) {
        let a = pins.level(self.phase_a);
        let b = pins.level(self.phase_b);

        #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
        let rotation = self.state.apply(a, b);

        #[cfg(feature = "defmt")]
        {
            if let Some(rotation) = rotation {
                defmt::trace!("Encoder {} -> {}", rotation, self.state.value());
            }
        }
    }
}
