//! Blocking delay abstraction
//!
//! Timed device protocols (the character LCD handshake in particular)
//! depend on minimum settle and pulse widths. Those waits are expressed
//! through [`BlockingDelay`] so they stay visible as busy waits: they stall
//! the foreground loop but leave interrupts enabled.

/// Busy-wait delay with millisecond granularity
///
/// Must not be replaced by a cooperative yield: callers rely on the wait
/// completing before the next bus edge.
pub trait BlockingDelay {
    /// Block for at least `ms` milliseconds
    fn wait_ms(&mut self, ms: u32);
}

impl<T: embedded_hal::delay::DelayNs> BlockingDelay for T {
    fn wait_ms(&mut self, ms: u32) {
        self.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_blanket_impl_waits_full_duration() {
        let mut delay = RecordingDelay { total_ns: 0 };
        delay.wait_ms(5);
        assert!(delay.total_ns >= 5_000_000);
    }
}
