//! Object lifecycle state machine
//!
//! Every object runs the same explicit, finite lifecycle: one-time setup,
//! then a steady per-tick state.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Lifecycle;
