//! State shared between the edge handlers and the foreground loop

use core::cell::Cell;

use critical_section::Mutex;
use maison_hal::Level;

use super::quadrature::Rotation;

/// Lowest value the counter can take
pub const VALUE_MIN: u8 = 0;

/// Highest value the counter can take
pub const VALUE_MAX: u8 = 254;

/// Counter, redraw flag and encoder phase memory
///
/// Every read-modify-write runs inside a single critical section, so an
/// edge handler can never interleave with the foreground take-and-clear.
pub struct SliderState {
    value: Mutex<Cell<u8>>,
    redraw: Mutex<Cell<bool>>,
    last_a: Mutex<Cell<Level>>,
    presses: Mutex<Cell<u16>>,
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderState {
    pub const fn new() -> Self {
        Self {
            value: Mutex::new(Cell::new(VALUE_MIN)),
            redraw: Mutex::new(Cell::new(false)),
            last_a: Mutex::new(Cell::new(Level::Low)),
            presses: Mutex::new(Cell::new(0)),
        }
    }

    /// Zero the counter and press count and drop any pending redraw
    pub fn reset(&self) {
        critical_section::with(|cs| {
            self.value.borrow(cs).set(VALUE_MIN);
            self.redraw.borrow(cs).set(false);
            self.presses.borrow(cs).set(0);
        });
    }

    /// Record the phase A level the decoder starts from
    pub fn capture_phase(&self, level: Level) {
        critical_section::with(|cs| self.last_a.borrow(cs).set(level));
    }

    /// Last phase A level seen by the decoder
    pub fn phase(&self) -> Level {
        critical_section::with(|cs| self.last_a.borrow(cs).get())
    }

    /// Current counter value
    pub fn value(&self) -> u8 {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    /// Check whether a redraw has been requested
    pub fn redraw_pending(&self) -> bool {
        critical_section::with(|cs| self.redraw.borrow(cs).get())
    }

    /// Ask the foreground loop to redraw
    pub fn request_redraw(&self) {
        critical_section::with(|cs| self.redraw.borrow(cs).set(true));
    }

    /// Clear a pending redraw and return the value to draw
    ///
    /// The flag is cleared before drawing, so an edge that lands while the
    /// display is being written raises it again for the next tick.
    pub fn take_redraw(&self) -> Option<u8> {
        critical_section::with(|cs| {
            let redraw = self.redraw.borrow(cs);
            if redraw.get() {
                redraw.set(false);
                Some(self.value.borrow(cs).get())
            } else {
                None
            }
        })
    }

    /// Number of switch presses since the last reset
    pub fn press_count(&self) -> u16 {
        critical_section::with(|cs| self.presses.borrow(cs).get())
    }

    /// Count one switch press, returning the counter value at that moment
    pub fn record_press(&self) -> u8 {
        critical_section::with(|cs| {
            let presses = self.presses.borrow(cs);
            presses.set(presses.get().wrapping_add(1));
            self.value.borrow(cs).get()
        })
    }

    /// Apply one phase A transition sampled as `(a, b)`
    ///
    /// Returns `None` when `a` matches the stored level (a bounced or
    /// repeated edge); nothing changes in that case. Otherwise the counter
    /// steps in the decoded direction, clamped to
    /// [`VALUE_MIN`]..=[`VALUE_MAX`], and a redraw is requested even when
    /// the step was clamped.
    pub fn apply(&self, a: Level, b: Level) -> Option<Rotation> {
        critical_section::with(|cs| {
            let last_a = self.last_a.borrow(cs);
            if last_a.get() == a {
                return None;
            }
            last_a.set(a);

            let rotation = Rotation::decode(a, b);
            let value = self.value.borrow(cs);
            value.set(rotation.step(value.get()));
            self.redraw.borrow(cs).set(true);

            Some(rotation)
        })
    }
}
