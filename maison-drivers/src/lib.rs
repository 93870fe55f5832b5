//! Device driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in maison-core and maison-hal, written against the pin-id GPIO
//! abstraction so they run on any port that implements it:
//!
//! - Character LCD (HD44780-compatible, 4-bit bus)
//! - Indicator LEDs (active-high or active-low, steady or blinking)
//! - Push buttons (short, long and multi-press classification)

#![no_std]
#![deny(unsafe_code)]

pub mod lcd;
pub mod service;
