#![no_main]
#![no_std]

use defmt_rtt as _;
use panic_probe as _;

use hal::{
    self,
    clocks::Clocks,
    gpio::Pull,
    pac,
    pac::TIM4,
    timer::{Timer, TimerConfig, TimerInterrupt},
};

use feeder_core::config::APP_TICK_HZ;
use feeder_core::kernel::Kernel;
use feeder_core::led::LedEvaluator;
use feeder_core::opto::OptoIndex;
use feeder_drivers::board::{Board, OptoWiring};
use feeder_drivers::pinout;
use feeder_drivers::pwm::{LedPwm, MotorPwm};

#[rtic::app(device = pac, peripherals = true)]
mod app {
    use super::*;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        tick_timer: Timer<TIM4>,
        kernel: Kernel,
        board: Board,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let dp = ctx.device;

        let clock_cfg = Clocks::default();
        clock_cfg.setup().unwrap();
        defmt::println!("feeder firmware: clocks up, sysclk {} Hz", clock_cfg.sysclk());

        let button_forward = pinout::button::FORWARD.init();
        let button_backward = pinout::button::BACKWARD.init();
        let feed_input = pinout::feed::FEED_INPUT.init();

        let mut opto_digital = pinout::opto::OPTO_DIGITAL.init();
        opto_digital.pull(Pull::Up);
        let opto = OptoWiring::Digital(opto_digital);

        const MOTOR_PWM_FREQ_HZ: u16 = 20_000;
        const LED_PWM_FREQ_HZ: u16 = 1_000;
        let motor_pwm = MotorPwm::new(dp.TIM2, &clock_cfg, MOTOR_PWM_FREQ_HZ);
        let led_pwm = LedPwm::new(dp.TIM3, &clock_cfg, LED_PWM_FREQ_HZ);

        let board = Board::new(
            Some(button_forward),
            Some(button_backward),
            Some(feed_input),
            opto,
            Some(motor_pwm),
            Some(led_pwm),
            None,
        );

        let kernel = Kernel::new(
            OptoIndex::new(feeder_core::opto::OptoSource::Digital),
            LedEvaluator::with_default_speed(),
        );

        let mut tick_timer = Timer::new_tim4(dp.TIM4, APP_TICK_HZ as f32, TimerConfig::default(), &clock_cfg);
        tick_timer.enable_interrupt(TimerInterrupt::Update);
        tick_timer.enable();

        (
            Shared {},
            Local {
                tick_timer,
                kernel,
                board,
            },
        )
    }

    #[task(binds = TIM4, local = [tick_timer, kernel, board])]
    fn control_tick(cx: control_tick::Context) {
        cx.local.tick_timer.clear_interrupt(TimerInterrupt::Update);
        cx.local.kernel.tick(cx.local.board);

        let heartbeat = cx.local.kernel.heartbeat();
        if heartbeat.tick_count % APP_TICK_HZ == 0 {
            defmt::info!(
                "tick {} state {} motor_target {} indexed {}",
                heartbeat.tick_count,
                heartbeat.app_state,
                heartbeat.motor_target,
                heartbeat.is_indexed
            );
        }
    }
}

#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
