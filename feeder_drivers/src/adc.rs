//! Oneshot ADC sampling for the optical index sensor.
//!
//! A read failure becomes `None`; last-good latch semantics live in
//! [`feeder_core::opto::OptoIndex`], not here.

use hal::adc::{Adc, AdcDevice};
use hal::pac::ADC1;

pub struct OptoAdc {
    adc: Adc<ADC1>,
    channel: u8,
}

impl OptoAdc {
    pub fn new(adc1: ADC1, systick_freq: f32, channel: u8) -> Self {
        let adc = Adc::new_adc1(adc1, AdcDevice::One, Default::default(), systick_freq);
        OptoAdc { adc, channel }
    }

    pub fn sample(&mut self) -> Option<u16> {
        self.adc.read(self.channel).ok()
    }
}
