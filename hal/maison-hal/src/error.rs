//! HAL error type

use crate::gpio::PinId;

/// Errors reported by pin configuration and interrupt registration
///
/// These only occur during bring-up. Once an object is running, GPIO
/// reads and writes are treated as infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Pin number does not exist on this port
    InvalidPin(u8),
    /// Pin already has an edge channel attached
    PinInUse(PinId),
    /// All edge channels are taken
    NoFreeChannel,
    /// No edge channel is attached to this pin
    NotRegistered(PinId),
    /// LED or button table is full
    NoFreeSlot,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::InvalidPin(n) => write!(f, "invalid pin number {}", n),
            HalError::PinInUse(pin) => write!(f, "{} already has an edge channel", pin),
            HalError::NoFreeChannel => write!(f, "no free edge channel"),
            HalError::NotRegistered(pin) => write!(f, "{} has no edge channel", pin),
            HalError::NoFreeSlot => write!(f, "service table full"),
        }
    }
}
