//! Optical index sensor wiring: either an ADC channel or a digital pin.
use super::PinDef;
use hal::gpio::{PinMode, Port};

/// ADC1 channel the opto sensor is wired to, when in analog mode.
pub const OPTO_ADC_CHANNEL: u8 = 6;

pub const OPTO_DIGITAL: PinDef = PinDef::new(Port::C, 3, PinMode::Input);
