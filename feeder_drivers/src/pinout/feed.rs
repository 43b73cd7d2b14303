//! External feed-request input pin.
use super::PinDef;
use hal::gpio::{PinMode, Port};

pub const FEED_INPUT: PinDef = PinDef::new(Port::C, 2, PinMode::Input);
