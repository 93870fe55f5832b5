//! Encoder-driven display object ("LCD slider")
//!
//! A rotary encoder moves a bounded counter that is shown on a 2x16
//! character LCD. The encoder is decoded in edge interrupts, which only
//! update [`SliderState`] and raise the redraw flag; the object redraws
//! from the foreground loop.
//!
//! ```text
//!   phase A edge ──► QuadratureHandler ──┐
//!                                        ├──► SliderState ◄── LcdSlider::process_tick ──► LCD
//!   switch edge  ──► PressHandler ───────┘
//! ```

use crate::config::SliderPins;

mod object;
mod press;
mod quadrature;
mod shared;

pub use object::{LcdSlider, SPLASH_TEXT, VALUE_LABEL};
pub use press::PressHandler;
pub use quadrature::{QuadratureHandler, Rotation};
pub use shared::{SliderState, VALUE_MAX, VALUE_MIN};

/// Both edge handlers of one slider, sharing its state
///
/// Built as a `static` next to the [`SliderState`] so the handlers can be
/// registered with `'static` lifetime.
pub struct SliderHandlers<'a> {
    pub state: &'a SliderState,
    pub quadrature: QuadratureHandler<'a>,
    pub press: PressHandler<'a>,
}

impl<'a> SliderHandlers<'a> {
    pub const fn new(state: &'a SliderState, pins: &SliderPins) -> Self {
        Self {
            state,
            quadrature: QuadratureHandler::new(state, pins.phase_a, pins.phase_b),
            press: PressHandler::new(state),
        }
    }
}
