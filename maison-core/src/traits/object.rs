//! Object contract
//!
//! Every object role implements [`Object`]. The firmware builds the one
//! object its configuration names and calls [`Object::process_tick`] once
//! per foreground loop iteration for the life of the device.

use maison_hal::HalError;

use super::display::DisplayError;
use crate::config::ConfigError;
use crate::objects::ObjectId;
use crate::state::Lifecycle;

/// Errors an object can report from a tick
///
/// All of these are bring-up failures. The object stays in
/// [`Lifecycle::Init`] and the firmware treats the error as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectError {
    /// Pin or interrupt setup failed
    Hal(HalError),
    /// Display bring-up or write failed
    Display(DisplayError),
    /// Pin roles are inconsistent
    Config(ConfigError),
}

impl From<HalError> for ObjectError {
    fn from(e: HalError) -> Self {
        ObjectError::Hal(e)
    }
}

impl From<DisplayError> for ObjectError {
    fn from(e: DisplayError) -> Self {
        ObjectError::Display(e)
    }
}

impl From<ConfigError> for ObjectError {
    fn from(e: ConfigError) -> Self {
        ObjectError::Config(e)
    }
}

/// One object role running on the board
pub trait Object {
    /// Which role this is
    fn id(&self) -> ObjectId;

    /// Current lifecycle state
    fn lifecycle(&self) -> Lifecycle;

    /// Run one foreground iteration
    ///
    /// Must return promptly apart from bounded display waits; never loops
    /// waiting for input.
    fn process_tick(&mut self) -> Result<(), ObjectError>;
}
