use hal::gpio::{Pin, PinMode, Port};

pub mod button;
pub mod feed;
pub mod led;
pub mod motor;
pub mod opto;

/// Definition of a GPIO pin, resolved to a live [`Pin`] on demand.
pub struct PinDef {
    port: Port,
    pin: u8,
    mode: PinMode,
}

impl PinDef {
    pub const fn new(port: Port, pin: u8, mode: PinMode) -> PinDef {
        PinDef { port, pin, mode }
    }

    /// Converts the definition to a live `Pin`, configuring it in the
    /// process.
    pub fn init(&self) -> Pin {
        Pin::new(self.port, self.pin, self.mode)
    }
}
