//! Button input pins.
use super::PinDef;
use hal::gpio::{PinMode, Port};

pub const FORWARD: PinDef = PinDef::new(Port::C, 0, PinMode::Input);
pub const BACKWARD: PinDef = PinDef::new(Port::C, 1, PinMode::Input);
