//! Configuration types
//!
//! Pin roles and bus timing are fixed per board and set once at build time.

pub mod pins;
pub mod timing;

pub use pins::*;
pub use timing::LcdTiming;
