//! Compile-time configuration surface for the feeder control kernel.
//!
//! Every constant here corresponds to a named entry in the feeder's
//! configuration table: tick rate, debounce/timeout tuning, and the
//! canonical PWM duty range the rest of the kernel computes in before a
//! platform rescales it to its own peripheral resolution.

/// Nominal control tick rate. The kernel itself does not schedule
/// anything at this rate — the platform's periodic timer does — but
/// ticks-per-second derived constants (the heartbeat interval) use it.
pub const APP_TICK_HZ: u32 = 1000;

/// Saturating counter ceiling for button debounce.
pub const APP_BUTTON_CNT_MAX: u8 = 20;

/// Ticks a button must stay debounced-pressed before it is a long press.
pub const APP_BUTTON_LONGPRESS: u16 = 400;

/// Feed-blink LED duration, in ticks.
pub const APP_FEED_PULSE_TICKS: u16 = 500;

/// Canonical PWM duty range the kernel computes in, before a platform
/// rescales to its own peripheral resolution.
pub const PWM_STM32_MAX: u16 = 2048;

/// Default LED chase cadence (sine table step between adjacent LEDs).
pub const SINE_SPEED_DEFAULT: u16 = 55;

/// Active-brake duration, in ticks.
pub const MOTOR_BRAKE_TICKS: u8 = 8;

/// Ticks distinguishing a short feed pulse from a long one.
pub const FEED_LONG_THRESHOLD: u32 = 10;

/// App FSM dwell on boot before entering idle.
pub const APP_INIT_TICKS: u16 = 200;

/// App FSM phase-1 timeout (leaving the current index).
pub const APP_PHASE1_TICKS: u16 = 500;

/// App FSM phase-2 timeout (seeking the next index).
pub const APP_PHASE2_TICKS: u16 = 1500;

/// Signed motor target commanded for a forward request.
pub const MOTOR_FORWARD_TARGET: i16 = PWM_STM32_MAX as i16;

/// Signed motor target commanded for a backward request.
pub const MOTOR_BACKWARD_TARGET: i16 = -(PWM_STM32_MAX as i16);

/// Rescales a duty value already in the canonical `0..=PWM_STM32_MAX`
/// range to a platform's native PWM resolution, saturating on overflow.
///
/// `value * max_native_duty / PWM_STM32_MAX`, carried out in `u32` so
/// `max_native_duty` up to 2^14 never overflows.
#[inline]
pub const fn scale_to_native_duty(value: u16, max_native_duty: u16) -> u16 {
    let clamped = if value > PWM_STM32_MAX {
        PWM_STM32_MAX
    } else {
        value
    };
    ((clamped as u32 * max_native_duty as u32) / PWM_STM32_MAX as u32) as u16
}
