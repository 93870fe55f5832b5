//! Maison Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the object firmware
//! is written against. Chip-specific crates (`maison-hal-nrf52`) implement
//! them, and host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Objects (maison-core, maison-drivers)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  maison-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  maison-hal-  │
//!             │    nrf52      │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioPort`], [`gpio::PinSampler`] - Digital I/O by pin id
//! - [`irq::EdgeRegistry`], [`irq::EdgeHandler`] - Edge-triggered callbacks
//! - [`delay::BlockingDelay`] - Busy-wait delays for timed protocols
//! - [`service::LedService`], [`service::ButtonService`] - Board services

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod error;
pub mod gpio;
pub mod irq;
pub mod service;

// Re-export key traits at crate root for convenience
pub use delay::BlockingDelay;
pub use error::HalError;
pub use gpio::{GpioPort, Level, PinDirection, PinId, PinSampler, Pull};
pub use irq::{Edge, EdgeHandler, EdgeRegistry, EdgeTable};
pub use service::{ButtonCallbacks, ButtonId, ButtonService, LedId, LedMode, LedService};
