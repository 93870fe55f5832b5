//! Events that trigger lifecycle transitions

/// Events that can trigger lifecycle transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// One-time setup finished without error
    SetupComplete,
    /// One foreground iteration completed
    Tick,
}
