//! Board-agnostic core logic for the object firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Object identity and the `Object` tick contract
//! - Lifecycle state machine (Init → Run)
//! - Display trait the object renders through
//! - Quadrature decoding and press detection for the encoder slider
//! - The encoder-driven display object ("LCD slider")
//! - Pin-role configuration types

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod objects;
pub mod slider;
pub mod state;
pub mod traits;
