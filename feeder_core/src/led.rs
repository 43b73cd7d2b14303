//! LED animation evaluator.
//!
//! Computes four duty values per tick from the sine table, the current
//! app-motion kind, the index latch, and a feed-blink sub-evaluator. All
//! outputs are in the canonical `0..=PWM_STM32_MAX` duty range; scaling to
//! a platform's native PWM resolution happens downstream via
//! [`crate::config::scale_to_native_duty`].

use crate::config::{APP_FEED_PULSE_TICKS, PWM_STM32_MAX, SINE_SPEED_DEFAULT};
use crate::feed::FeedSignal;
use crate::sine::sine_at;

/// Motion classification the LED evaluator cares about, derived from the
/// app FSM's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Idle,
    Forward,
    Backward,
    /// Any other state (only `init`, in practice).
    Other,
}

/// One tick's worth of LED duty values, canonical `0..=PWM_STM32_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedFrame {
    pub duty: [u16; 4],
}

/// LED animation evaluator plus feed-blink sub-evaluator.
pub struct LedEvaluator {
    sine_speed: u16,
    feed_blink: u16,
}

impl LedEvaluator {
    pub const fn new(sine_speed: u16) -> Self {
        LedEvaluator {
            sine_speed,
            feed_blink: 0,
        }
    }

    pub const fn with_default_speed() -> Self {
        Self::new(SINE_SPEED_DEFAULT)
    }

    /// Computes this tick's four LED duties from the tick counter,
    /// motion kind, and index latch. All additions into the sine table
    /// are folded modulo 256 before lookup.
    pub fn frame(&self, tick_counter: u32, mode: LedMode, is_indexed: bool) -> LedFrame {
        const SINE_SCALE: u16 = 8;
        let m = tick_counter;
        let s = self.sine_speed as u32;

        let raw = match mode {
            LedMode::Idle if is_indexed => [0u32, 0, 0, PWM_STM32_MAX as u32],
            LedMode::Idle => [0, sine_at(m) as u32, sine_at(m + 128) as u32, 0],
            LedMode::Forward => [
                sine_at(m) as u32,
                sine_at(m + s) as u32,
                sine_at(m + 2 * s) as u32,
                sine_at(m + 3 * s) as u32,
            ],
            LedMode::Backward => [
                sine_at(m + 3 * s) as u32,
                sine_at(m + 2 * s) as u32,
                sine_at(m + s) as u32,
                sine_at(m) as u32,
            ],
            LedMode::Other => [
                sine_at(m) as u32,
                sine_at(m + 128) as u32,
                sine_at(m + 256) as u32,
                sine_at(m + 384) as u32,
            ],
        };

        let mut duty = [0u16; 4];
        for (out, &sample) in duty.iter_mut().zip(raw.iter()) {
            *out = (sample * SINE_SCALE as u32).min(PWM_STM32_MAX as u32) as u16;
        }
        LedFrame { duty }
    }

    /// Advances the feed-blink countdown by one tick. Reloads to
    /// [`APP_FEED_PULSE_TICKS`] whenever the feed signal is non-none,
    /// decrements otherwise (not below zero). Returns whether the blink
    /// is currently active.
    pub fn tick_feed_blink(&mut self, feed_signal: FeedSignal) -> bool {
        if feed_signal != FeedSignal::None {
            self.feed_blink = APP_FEED_PULSE_TICKS;
        }
        if self.feed_blink > 0 {
            self.feed_blink -= 1;
        }
        self.feed_blink > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_indexed_is_led3_only() {
        let led = LedEvaluator::with_default_speed();
        for tick in 0..256u32 {
            let frame = led.frame(tick, LedMode::Idle, true);
            assert_eq!(frame.duty, [0, 0, 0, PWM_STM32_MAX]);
        }
    }

    #[test]
    fn duty_values_stay_within_canonical_range() {
        let led = LedEvaluator::with_default_speed();
        for tick in 0..1024u32 {
            for mode in [LedMode::Idle, LedMode::Forward, LedMode::Backward, LedMode::Other] {
                let frame = led.frame(tick, mode, false);
                for duty in frame.duty {
                    assert!(duty <= PWM_STM32_MAX);
                }
            }
        }
    }

    #[test]
    fn frame_is_periodic_modulo_256() {
        let led = LedEvaluator::with_default_speed();
        for mode in [LedMode::Idle, LedMode::Forward, LedMode::Backward, LedMode::Other] {
            let a = led.frame(10, mode, false);
            let b = led.frame(10 + 256, mode, false);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn feed_blink_reloads_and_decays() {
        let mut led = LedEvaluator::with_default_speed();
        assert!(!led.tick_feed_blink(FeedSignal::None));
        assert!(led.tick_feed_blink(FeedSignal::Short));
        for _ in 0..(APP_FEED_PULSE_TICKS - 2) {
            assert!(led.tick_feed_blink(FeedSignal::None));
        }
        assert!(!led.tick_feed_blink(FeedSignal::None));
    }
}
