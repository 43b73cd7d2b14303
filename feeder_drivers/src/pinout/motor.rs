//! Two-pin H-bridge PWM outputs.
use super::PinDef;
use hal::gpio::{PinMode, Port};

pub const IN1: PinDef = PinDef::new(Port::A, 8, PinMode::Alt(6));
pub const IN2: PinDef = PinDef::new(Port::A, 9, PinMode::Alt(6));
