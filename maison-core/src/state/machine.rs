//! Lifecycle definition
//!
//! What an object does on a tick is a function of its current state.

use super::events::Event;

/// Object lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Entry state: the next tick performs one-time setup
    #[default]
    Init,
    /// Steady state: each tick services pending work
    Run,
    /// Reserved for a low-power mode; no event leads here yet
    Idle,
}

impl Lifecycle {
    /// Check if setup has completed
    pub fn is_running(&self) -> bool {
        matches!(self, Lifecycle::Run)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Lifecycle::*;

        match (self, event) {
            (Init, SetupComplete) => Run,
            (Run, Tick) => Run,

            // Default: stay in current state
            _ => self,
        }
    }
}
