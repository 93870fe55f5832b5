//! Build-time object configuration
//!
//! `build.rs` validates object.toml and generates the constants included
//! here: which object this image runs and how the board is wired.

use maison_core::config::{LcdPins, SliderPins};
use maison_core::objects::ObjectId;
use maison_hal::PinId;

include!(concat!(env!("OUT_DIR"), "/object_config.rs"));
