//! PWM peripheral wrappers for the motor H-bridge and the status LEDs.
//!
//! Both follow the same shape: own a hardware timer, expose `begin()` to
//! enable the channels and configure the pins, and `apply_*` to push a
//! fresh duty vector every tick. Duty conversion saturates rather than
//! panicking, since a bad upstream value must never wedge the tick.

use hal::{
    clocks::Clocks,
    pac::{TIM2, TIM3},
    timer::{
        Alignment, CaptureCompareDma, CountDir, OutputCompare, TimChannel, Timer, TimerConfig,
        TimerInterrupt, UpdateReqSrc,
    },
};

use crate::pinout;
use feeder_core::config::PWM_STM32_MAX;

fn timer_config() -> TimerConfig {
    TimerConfig {
        one_pulse_mode: false,
        update_request_source: UpdateReqSrc::Any,
        auto_reload_preload: true,
        alignment: Alignment::Center1,
        capture_compare_dma: CaptureCompareDma::Update,
        direction: CountDir::Up,
    }
}

/// Scales a canonical-range duty (`-PWM_STM32_MAX..=PWM_STM32_MAX` or
/// `0..=PWM_STM32_MAX`) into the timer's native period. Negative values
/// saturate to zero, mirroring the H-bridge convention where only the
/// active direction's channel carries nonzero duty.
fn duty_to_period(duty: i16, period: u32) -> u32 {
    if duty > 0 {
        (duty as u32 * period) >> 11
    } else {
        0
    }
}

/// Drives the two-pin H-bridge from a signed motor duty: positive is
/// `(in1=0, in2=duty)`, negative is `(in1=|duty|, in2=0)`.
pub struct MotorPwm {
    tim: Timer<TIM2>,
}

impl MotorPwm {
    pub fn new(tim2: TIM2, clock_cfg: &Clocks, freq: u16) -> Self {
        let mut timer = Timer::new_tim2(tim2, freq as f32, timer_config(), clock_cfg);
        timer.enable_interrupt(TimerInterrupt::Update);
        timer.enable();
        MotorPwm { tim: timer }
    }

    pub fn get_timer(&mut self) -> &mut Timer<TIM2> {
        &mut self.tim
    }

    pub fn begin(&mut self) {
        self.tim.enable_pwm_output(TimChannel::C1, OutputCompare::Pwm1, 0.0);
        self.tim.enable_pwm_output(TimChannel::C2, OutputCompare::Pwm1, 0.0);
        pinout::motor::IN1.init();
        pinout::motor::IN2.init();
    }

    /// `duty` is the canonical signed motor drive, `-PWM_STM32_MAX..=PWM_STM32_MAX`.
    pub fn apply(&mut self, duty: i16) {
        let period = self.tim.get_max_duty();
        let (in1, in2) = if duty >= 0 {
            (0i16, duty)
        } else {
            (duty.saturating_neg(), 0)
        };
        self.tim.set_duty(TimChannel::C1, duty_to_period(in1, period));
        self.tim.set_duty(TimChannel::C2, duty_to_period(in2, period));
    }

    pub fn max_native_duty(&mut self) -> u16 {
        self.tim.get_max_duty().min(u16::MAX as u32) as u16
    }
}

/// Drives the four status LEDs from canonical `0..=PWM_STM32_MAX` duties.
pub struct LedPwm {
    tim: Timer<TIM3>,
}

impl LedPwm {
    pub fn new(tim3: TIM3, clock_cfg: &Clocks, freq: u16) -> Self {
        let mut timer = Timer::new_tim3(tim3, freq as f32, timer_config(), clock_cfg);
        timer.enable();
        LedPwm { tim: timer }
    }

    pub fn begin(&mut self) {
        self.tim.enable_pwm_output(TimChannel::C1, OutputCompare::Pwm1, 0.0);
        self.tim.enable_pwm_output(TimChannel::C2, OutputCompare::Pwm1, 0.0);
        self.tim.enable_pwm_output(TimChannel::C3, OutputCompare::Pwm1, 0.0);
        self.tim.enable_pwm_output(TimChannel::C4, OutputCompare::Pwm1, 0.0);
        pinout::led::LED0.init();
        pinout::led::LED1.init();
        pinout::led::LED2.init();
        pinout::led::LED3.init();
    }

    /// `duty` is four canonical `0..=PWM_STM32_MAX` values.
    pub fn apply(&mut self, duty: [u16; 4]) {
        let period = self.tim.get_max_duty();
        let channels = [TimChannel::C1, TimChannel::C2, TimChannel::C3, TimChannel::C4];
        for (channel, value) in channels.iter().zip(duty.iter()) {
            let clamped = (*value).min(PWM_STM32_MAX) as i16;
            self.tim.set_duty(*channel, duty_to_period(clamped, period));
        }
    }

    pub fn max_native_duty(&mut self) -> u16 {
        self.tim.get_max_duty().min(u16::MAX as u32) as u16
    }
}
