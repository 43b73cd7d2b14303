//! Top-level tick pipeline.
//!
//! Owns every recognizer and state machine as plain fields (no file-local
//! statics) and runs them in the fixed per-tick order: buttons, feed,
//! opto, application FSM, motor FSM, LED evaluator.

use crate::app_fsm::{AppFsm, AppState};
use crate::button::Button;
use crate::config::scale_to_native_duty;
use crate::feed::{FeedRecognizer, FeedSignal};
use crate::led::LedEvaluator;
use crate::motor_fsm::MotorFsm;
use crate::opto::OptoIndex;
use crate::platform::{Inputs, Outputs, Platform};

/// Snapshot of kernel state for the once-a-second heartbeat log.
#[derive(Debug, Clone, Copy)]
pub struct Heartbeat {
    pub tick_count: u32,
    pub app_state: AppState,
    pub motor_target: i16,
    pub is_indexed: bool,
}

/// The periodic control kernel. One instance per feeder, owned by
/// whatever installs the periodic tick callback.
pub struct Kernel {
    tick_count: u32,
    button_forward: Button,
    button_backward: Button,
    feed: FeedRecognizer,
    opto: OptoIndex,
    app: AppFsm,
    motor: MotorFsm,
    led: LedEvaluator,
    last_motor_target: i16,
    feed_blink_active: bool,
}

impl Kernel {
    pub fn new(opto: OptoIndex, led: LedEvaluator) -> Self {
        Kernel {
            tick_count: 0,
            button_forward: Button::new(),
            button_backward: Button::new(),
            feed: FeedRecognizer::new(),
            opto,
            app: AppFsm::new(),
            motor: MotorFsm::new(),
            led,
            last_motor_target: 0,
            feed_blink_active: false,
        }
    }

    /// Runs one tick of the pipeline: reads `platform`'s inputs, advances
    /// every component in order, and hands the resulting outputs back to
    /// `platform`.
    pub fn tick<P: Platform>(&mut self, platform: &mut P) {
        let inputs = platform.read_inputs();
        self.tick_with(inputs);
        platform.apply_outputs(self.outputs());
    }

    fn tick_with(&mut self, inputs: Inputs) {
        self.tick_count = self.tick_count.wrapping_add(1);

        let fwd_event = self.button_forward.tick(inputs.button_forward);
        let bwd_event = self.button_backward.tick(inputs.button_backward);
        self.feed.tick(inputs.feed_input);
        self.opto.tick(inputs.opto.0);

        let mut feed_signal = self.feed.signal();
        let command = self
            .app
            .tick(fwd_event, bwd_event, &mut feed_signal, self.opto.is_indexed());
        *self.feed.signal_mut() = feed_signal;

        let drive = self.motor.tick(command);
        self.last_motor_target = drive.duty;

        self.feed_blink_active = self.led.tick_feed_blink(self.feed.signal());
    }

    fn outputs(&self) -> Outputs {
        let frame = self
            .led
            .frame(self.tick_count, self.app.led_mode(), self.opto.is_indexed());
        Outputs {
            motor: crate::motor_fsm::MotorDrive {
                duty: self.last_motor_target,
            },
            led_duty: frame.duty,
            feed_blink_active: self.feed_blink_active,
        }
    }

    /// Scales a canonical `0..=PWM_STM32_MAX` LED duty into a PWM
    /// peripheral's native resolution.
    pub fn scale_led_duty(value: u16, max_native_duty: u16) -> u16 {
        scale_to_native_duty(value, max_native_duty)
    }

    pub fn heartbeat(&self) -> Heartbeat {
        Heartbeat {
            tick_count: self.tick_count,
            app_state: self.app.state(),
            motor_target: self.last_motor_target,
            is_indexed: self.opto.is_indexed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opto::OptoSource;
    use crate::platform::OptoSampleInput;

    struct FakePlatform {
        inputs: Inputs,
        last_outputs: Outputs,
    }

    impl Platform for FakePlatform {
        fn read_inputs(&mut self) -> Inputs {
            self.inputs
        }
        fn apply_outputs(&mut self, outputs: Outputs) {
            self.last_outputs = outputs;
        }
    }

    fn kernel_with_digital_opto() -> Kernel {
        Kernel::new(OptoIndex::new(OptoSource::Digital), LedEvaluator::with_default_speed())
    }

    #[test]
    fn heartbeat_tracks_tick_count() {
        let mut kernel = kernel_with_digital_opto();
        let mut platform = FakePlatform {
            inputs: Inputs::default(),
            last_outputs: Outputs::default(),
        };
        for _ in 0..10 {
            kernel.tick(&mut platform);
        }
        assert_eq!(kernel.heartbeat().tick_count, 10);
    }

    #[test]
    fn short_forward_press_eventually_idles_with_zero_drive() {
        let mut kernel = kernel_with_digital_opto();
        let mut platform = FakePlatform {
            inputs: Inputs {
                button_forward: true,
                opto: OptoSampleInput(crate::opto::OptoSample::Digital(false)),
                ..Inputs::default()
            },
            last_outputs: Outputs::default(),
        };

        // Hold long enough to debounce, then release.
        for _ in 0..300 {
            kernel.tick(&mut platform);
        }
        platform.inputs.button_forward = false;

        // Release and let the index-seek phase resolve: bring the index
        // latch true partway through so the motor stops and brakes out.
        for i in 0..2600 {
            if i == 600 {
                platform.inputs.opto = OptoSampleInput(crate::opto::OptoSample::Digital(true));
            }
            kernel.tick(&mut platform);
        }

        assert_eq!(platform.last_outputs.motor.duty, 0);
    }
}
