//! nRF52832-specific HAL for the Maison object firmware
//!
//! Implements the `maison-hal` traits directly on the P0 and GPIOTE
//! registers:
//!
//! - [`gpio::NrfGpio`] - pin configuration, output and input by pin id
//! - [`gpiote::GpioteEdges`] - edge handlers on the 8 GPIOTE channels
//!
//! The embassy-nrf `gpiote` driver is not used: the firmware owns the
//! GPIOTE interrupt vector and forwards it to [`gpiote::on_interrupt`].

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod gpiote;

pub use gpio::NrfGpio;
pub use gpiote::{shared_table, GpioteEdges, SharedEdgeTable, GPIOTE_CHANNELS};
