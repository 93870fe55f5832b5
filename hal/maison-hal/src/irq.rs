//! Edge-triggered interrupt abstractions
//!
//! An [`EdgeHandler`] is attached to a pin through an [`EdgeRegistry`].
//! When the selected transition occurs, the platform's interrupt vector
//! calls the handler with a [`PinSampler`] so it can read the pins it needs.
//!
//! Handlers run in interrupt context: they must be short, must not block,
//! and must protect any state they share with the foreground loop.

use crate::error::HalError;
use crate::gpio::{Level, PinId, PinSampler, Pull};

/// Transition that fires a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
    /// Any change
    Toggle,
}

impl Edge {
    /// Check if a level change is one this edge fires on
    pub fn matches(self, before: Level, after: Level) -> bool {
        match self {
            Edge::Rising => before.is_low() && after.is_high(),
            Edge::Falling => before.is_high() && after.is_low(),
            Edge::Toggle => before != after,
        }
    }
}

/// Callback invoked from interrupt context on a registered edge
pub trait EdgeHandler: Sync {
    /// Handle one edge event
    fn on_edge(&self, pins: &dyn PinSampler);
}

/// Registration of edge handlers against pins
///
/// Registration happens during object init. A failure here is fatal: an
/// object whose inputs cannot interrupt has no degraded mode.
pub trait EdgeRegistry<'a> {
    /// Attach a handler to a pin; the channel starts disabled
    ///
    /// Returns the channel index used.
    fn register(
        &mut self,
        pin: PinId,
        edge: Edge,
        pull: Pull,
        handler: &'a dyn EdgeHandler,
    ) -> Result<usize, HalError>;

    /// Enable or disable the channel attached to a pin
    fn enable(&mut self, pin: PinId, enabled: bool) -> Result<(), HalError>;
}

/// One attached edge channel
#[derive(Clone, Copy)]
pub struct EdgeChannel<'a> {
    /// Pin being watched
    pub pin: PinId,
    /// Transition that fires the handler
    pub edge: Edge,
    /// Pull applied to the input
    pub pull: Pull,
    /// Whether events are dispatched
    pub enabled: bool,
    handler: &'a dyn EdgeHandler,
}

impl<'a> EdgeChannel<'a> {
    /// Handler attached to this channel
    pub fn handler(&self) -> &'a dyn EdgeHandler {
        self.handler
    }
}

/// Fixed-capacity edge channel table
///
/// `N` matches the number of hardware edge channels (8 GPIOTE channels on
/// the nRF52832). The table is the bookkeeping half of a registry; chip
/// crates pair it with the register writes for their interrupt controller.
pub struct EdgeTable<'a, const N: usize> {
    channels: [Option<EdgeChannel<'a>>; N],
}

impl<'a, const N: usize> Default for EdgeTable<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> EdgeTable<'a, N> {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            channels: [None; N],
        }
    }

    /// Attach a handler to the first free channel
    pub fn attach(
        &mut self,
        pin: PinId,
        edge: Edge,
        pull: Pull,
        handler: &'a dyn EdgeHandler,
    ) -> Result<usize, HalError> {
        if self.find(pin).is_some() {
            return Err(HalError::PinInUse(pin));
        }

        let index = self
            .channels
            .iter()
            .position(Option::is_none)
            .ok_or(HalError::NoFreeChannel)?;

        self.channels[index] = Some(EdgeChannel {
            pin,
            edge,
            pull,
            enabled: false,
            handler,
        });

        Ok(index)
    }

    /// Enable or disable the channel for a pin, returning its index
    pub fn set_enabled(&mut self, pin: PinId, enabled: bool) -> Result<usize, HalError> {
        let index = self.find(pin).ok_or(HalError::NotRegistered(pin))?;
        if let Some(channel) = self.channels[index].as_mut() {
            channel.enabled = enabled;
        }
        Ok(index)
    }

    /// Find the channel index attached to a pin
    pub fn find(&self, pin: PinId) -> Option<usize> {
        self.channels
            .iter()
            .position(|c| matches!(c, Some(channel) if channel.pin == pin))
    }

    /// Get a channel by index
    pub fn channel(&self, index: usize) -> Option<&EdgeChannel<'a>> {
        self.channels.get(index).and_then(Option::as_ref)
    }

    /// Handler to run for an event on a channel, if the channel is enabled
    pub fn handler_for(&self, index: usize) -> Option<&'a dyn EdgeHandler> {
        self.channel(index)
            .filter(|c| c.enabled)
            .map(EdgeChannel::handler)
    }

    /// Run the handler for an event on a channel
    ///
    /// Returns true if a handler ran.
    pub fn dispatch(&self, index: usize, pins: &dyn PinSampler) -> bool {
        match self.handler_for(index) {
            Some(handler) => {
                handler.on_edge(pins);
                true
            }
            None => false,
        }
    }

    /// Number of attached channels
    pub fn len(&self) -> usize {
        self.channels.iter().filter(|c| c.is_some()).count()
    }

    /// Check if no channels are attached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if every channel is attached
    pub fn is_full(&self) -> bool {
        self.len() == N
    }
}

impl<'a, const N: usize> EdgeRegistry<'a> for EdgeTable<'a, N> {
    fn register(
        &mut self,
        pin: PinId,
        edge: Edge,
        pull: Pull,
        handler: &'a dyn EdgeHandler,
    ) -> Result<usize, HalError> {
        self.attach(pin, edge, pull, handler)
    }

    fn enable(&mut self, pin: PinId, enabled: bool) -> Result<(), HalError> {
        self.set_enabled(pin, enabled).map(|_| ())
    }
}
