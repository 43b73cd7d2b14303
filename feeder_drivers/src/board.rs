//! Concrete [`Platform`] implementation wiring GPIO, ADC, and PWM
//! peripherals to the control kernel.

use hal::gpio::Pin;

use feeder_core::config::PWM_STM32_MAX;
use feeder_core::opto::OptoSample;
use feeder_core::platform::{Inputs, Outputs, OptoSampleInput, Platform};

use crate::adc::OptoAdc;
use crate::pwm::{LedPwm, MotorPwm};

/// Which source feeds the opto-index latch on this board.
pub enum OptoWiring {
    Adc(OptoAdc),
    Digital(Pin),
    Unused,
}

/// Board-support wiring: buttons, feed input, opto source, motor PWM,
/// LED PWM, and the optional dedicated feed-blink pin. Every peripheral
/// slot is independently optional, mirroring the original's unused-pin
/// sentinel — a board missing a role simply skips its read or drive.
pub struct Board {
    button_forward: Option<Pin>,
    button_backward: Option<Pin>,
    feed_input: Option<Pin>,
    opto: OptoWiring,
    motor_pwm: Option<MotorPwm>,
    led_pwm: Option<LedPwm>,
    feed_led: Option<Pin>,
}

impl Board {
    pub fn new(
        button_forward: Option<Pin>,
        button_backward: Option<Pin>,
        feed_input: Option<Pin>,
        opto: OptoWiring,
        mut motor_pwm: Option<MotorPwm>,
        mut led_pwm: Option<LedPwm>,
        feed_led: Option<Pin>,
    ) -> Self {
        if let Some(motor_pwm) = &mut motor_pwm {
            motor_pwm.begin();
        }
        if let Some(led_pwm) = &mut led_pwm {
            led_pwm.begin();
        }
        Board {
            button_forward,
            button_backward,
            feed_input,
            opto,
            motor_pwm,
            led_pwm,
            feed_led,
        }
    }
}

impl Platform for Board {
    fn read_inputs(&mut self) -> Inputs {
        let opto = match &mut self.opto {
            OptoWiring::Adc(adc) => OptoSampleInput(OptoSample::Adc(adc.sample())),
            OptoWiring::Digital(pin) => OptoSampleInput(OptoSample::Digital(pin.is_high())),
            OptoWiring::Unused => OptoSampleInput(OptoSample::Unused),
        };

        Inputs {
            button_forward: self.button_forward.as_ref().is_some_and(|pin| pin.is_high()),
            button_backward: self.button_backward.as_ref().is_some_and(|pin| pin.is_high()),
            feed_input: self.feed_input.as_ref().is_some_and(|pin| pin.is_high()),
            opto,
        }
    }

    fn apply_outputs(&mut self, outputs: Outputs) {
        if let Some(motor_pwm) = &mut self.motor_pwm {
            motor_pwm.apply(outputs.motor.duty);
        }

        let mut led_duty = outputs.led_duty;
        match &mut self.feed_led {
            Some(pin) => {
                if outputs.feed_blink_active {
                    pin.set_high();
                } else {
                    pin.set_low();
                }
            }
            None if outputs.feed_blink_active => {
                led_duty[3] = led_duty[3].max(PWM_STM32_MAX);
            }
            None => {}
        }

        if let Some(led_pwm) = &mut self.led_pwm {
            led_pwm.apply(led_duty);
        }
    }
}
