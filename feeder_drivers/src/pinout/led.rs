//! Status LED pins and the optional dedicated feed-blink pin.
use super::PinDef;
use hal::gpio::{PinMode, Port};

pub const LED0: PinDef = PinDef::new(Port::B, 0, PinMode::Alt(2));
pub const LED1: PinDef = PinDef::new(Port::B, 1, PinMode::Alt(2));
pub const LED2: PinDef = PinDef::new(Port::B, 4, PinMode::Alt(2));
pub const LED3: PinDef = PinDef::new(Port::B, 5, PinMode::Alt(2));

/// Dedicated feed-blink indicator, wired on boards that have a spare
/// digital output for it. Boards without one fold the blink onto LED3
/// instead; see [`crate::board::Board`].
pub const FEED_LED: PinDef = PinDef::new(Port::B, 6, PinMode::Output);
