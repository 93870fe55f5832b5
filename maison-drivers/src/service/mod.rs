//! Board service implementations
//!
//! Both services are polled from a board task with a millisecond
//! timestamp; neither needs interrupts.

mod button;
mod led;

pub use button::{
    ButtonBank, ButtonEvent, ButtonTracker, PressKind, DEBOUNCE_MS, LONG_PRESS_MS,
    MULTI_PRESS_COUNT, MULTI_PRESS_GAP_MS,
};
pub use led::{GpioLed, LedBank};
