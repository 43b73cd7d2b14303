//! External feed-request recognizer.
//!
//! Watches a single digital input and classifies the dwell time of each
//! active pulse into a [`FeedSignal`] once it ends. The signal is a
//! one-shot latch: [`AppFsm`](crate::app_fsm::AppFsm) clears it back to
//! [`FeedSignal::None`] once consumed.

use crate::config::FEED_LONG_THRESHOLD;

/// Classification of a completed feed pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSignal {
    /// No pulse has completed since the last consumption.
    None,
    /// Pulse dwell was at or below [`FEED_LONG_THRESHOLD`] ticks.
    Short,
    /// Pulse dwell exceeded [`FEED_LONG_THRESHOLD`] ticks.
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DwellState {
    Low,
    High,
}

/// Recognizer for the external feed-request input.
pub struct FeedRecognizer {
    state: DwellState,
    dwell: u32,
    signal: FeedSignal,
}

impl Default for FeedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedRecognizer {
    pub const fn new() -> Self {
        FeedRecognizer {
            state: DwellState::Low,
            dwell: 0,
            signal: FeedSignal::None,
        }
    }

    /// Advances the recognizer by one tick given the raw feed-input
    /// level. On the active-to-inactive edge, classifies the completed
    /// pulse into the latch.
    pub fn tick(&mut self, raw_active: bool) {
        match self.state {
            DwellState::Low => {
                if raw_active {
                    self.dwell = 0;
                    self.state = DwellState::High;
                }
            }
            DwellState::High => {
                if !raw_active {
                    self.signal = if self.dwell > FEED_LONG_THRESHOLD {
                        FeedSignal::Long
                    } else {
                        FeedSignal::Short
                    };
                    self.state = DwellState::Low;
                }
                self.dwell += 1;
            }
        }
    }

    /// Mutable access to the latch, for the consuming FSM to read and
    /// clear in one place (invariant I7: one-shot consumption).
    pub fn signal_mut(&mut self) -> &mut FeedSignal {
        &mut self.signal
    }

    pub fn signal(&self) -> FeedSignal {
        self.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse(ticks: u32) -> FeedRecognizer {
        let mut feed = FeedRecognizer::new();
        for _ in 0..ticks {
            feed.tick(true);
        }
        feed.tick(false);
        feed
    }

    #[test]
    fn short_pulse_classified_short() {
        let feed = pulse(5);
        assert_eq!(feed.signal(), FeedSignal::Short);
    }

    #[test]
    fn long_pulse_classified_long() {
        let feed = pulse(20);
        assert_eq!(feed.signal(), FeedSignal::Long);
    }

    #[test]
    fn consumption_clears_the_latch() {
        let mut feed = pulse(5);
        assert_eq!(feed.signal(), FeedSignal::Short);
        *feed.signal_mut() = FeedSignal::None;
        assert_eq!(feed.signal(), FeedSignal::None);
    }
}
