//! Hardware abstraction traits
//!
//! These traits define the interface between the object logic and the
//! drivers that implement it.

pub mod display;
pub mod object;

pub use display::{DisplayError, DisplayExt, TextDisplay};
pub use object::{Object, ObjectError};
