//! Application state machine.
//!
//! Folds button events, the feed-signal latch, and the index latch into
//! a motion command for [`MotorFsm`](crate::motor_fsm::MotorFsm), via the
//! two-phase increment/seek sequence that guarantees a one-shot request
//! always advances by exactly one index.

use crate::button::ButtonEvent;
use crate::config::{APP_INIT_TICKS, APP_PHASE1_TICKS, APP_PHASE2_TICKS};
use crate::feed::FeedSignal;
use crate::led::LedMode;
use crate::motor_fsm::MotorCommand;

/// The app FSM's full eight-way state, reported verbatim by the
/// heartbeat log (unlike [`LedMode`], which collapses several of these
/// into one animation kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum AppState {
    Init,
    Idle,
    IncFwd1,
    IncFwd2,
    IncBwd1,
    IncBwd2,
    FreeFwd,
    FreeBwd,
}

/// Application FSM: coordinates motion requests from buttons, the feed
/// input, and the index latch into a single motor command.
pub struct AppFsm {
    state: AppState,
    timer: u16,
    fwd_one_shot: bool,
    bwd_one_shot: bool,
    fwd_continuous: bool,
    bwd_continuous: bool,
}

impl Default for AppFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl AppFsm {
    pub const fn new() -> Self {
        AppFsm {
            state: AppState::Init,
            timer: APP_INIT_TICKS,
            fwd_one_shot: false,
            bwd_one_shot: false,
            fwd_continuous: false,
            bwd_continuous: false,
        }
    }

    fn fold(flag_one_shot: &mut bool, flag_continuous: &mut bool, event: ButtonEvent) {
        match event {
            ButtonEvent::Short => *flag_one_shot = true,
            ButtonEvent::Hold => *flag_continuous = true,
            ButtonEvent::None | ButtonEvent::Long => *flag_continuous = false,
        }
    }

    /// Advances the FSM by one tick and returns this tick's motor
    /// command. `feed_signal` is consumed (reset to `None`) if this tick
    /// acts on it, per the one-shot feed-signal contract.
    pub fn tick(
        &mut self,
        fwd_event: ButtonEvent,
        bwd_event: ButtonEvent,
        feed_signal: &mut FeedSignal,
        is_indexed: bool,
    ) -> MotorCommand {
        Self::fold(&mut self.fwd_one_shot, &mut self.fwd_continuous, fwd_event);
        Self::fold(&mut self.bwd_one_shot, &mut self.bwd_continuous, bwd_event);

        match self.state {
            AppState::Init => {
                // Leaves `init` after exactly one tick; `timer` is set here
                // for reuse by later states, not counted down in place.
                self.state = AppState::Idle;
                self.timer = APP_INIT_TICKS;
                MotorCommand::Stop
            }
            AppState::Idle => {
                if self.fwd_one_shot || *feed_signal == FeedSignal::Short {
                    self.fwd_one_shot = false;
                    *feed_signal = FeedSignal::None;
                    self.state = AppState::IncFwd1;
                    self.timer = APP_PHASE1_TICKS;
                } else if self.bwd_one_shot || *feed_signal == FeedSignal::Long {
                    self.bwd_one_shot = false;
                    *feed_signal = FeedSignal::None;
                    self.state = AppState::IncBwd1;
                    self.timer = APP_PHASE1_TICKS;
                } else if self.fwd_continuous {
                    self.state = AppState::FreeFwd;
                } else if self.bwd_continuous {
                    self.state = AppState::FreeBwd;
                }
                MotorCommand::Stop
            }
            AppState::IncFwd1 => {
                // Deliberately two independent ifs, not an else-if: a jump
                // to phase 2 still lets the freshly reloaded timer tick
                // down once on this same tick.
                if !is_indexed {
                    self.state = AppState::IncFwd2;
                    self.timer = APP_PHASE2_TICKS;
                }
                if self.timer > 0 {
                    self.timer -= 1;
                } else {
                    self.state = AppState::Idle;
                }
                MotorCommand::Forward
            }
            AppState::IncFwd2 => {
                if is_indexed {
                    self.state = AppState::Idle;
                } else if self.timer > 0 {
                    self.timer -= 1;
                } else {
                    self.state = AppState::Idle;
                }
                MotorCommand::Forward
            }
            AppState::IncBwd1 => {
                if !is_indexed {
                    self.state = AppState::IncBwd2;
                    self.timer = APP_PHASE2_TICKS;
                }
                if self.timer > 0 {
                    self.timer -= 1;
                } else {
                    self.state = AppState::Idle;
                }
                MotorCommand::Backward
            }
            AppState::IncBwd2 => {
                if is_indexed {
                    self.state = AppState::Idle;
                } else if self.timer > 0 {
                    self.timer -= 1;
                } else {
                    self.state = AppState::Idle;
                }
                MotorCommand::Backward
            }
            AppState::FreeFwd => {
                if !self.fwd_continuous {
                    self.state = AppState::IncFwd2;
                    self.timer = APP_PHASE2_TICKS;
                }
                MotorCommand::Forward
            }
            AppState::FreeBwd => {
                if !self.bwd_continuous {
                    self.state = AppState::IncBwd2;
                    self.timer = APP_PHASE2_TICKS;
                }
                MotorCommand::Backward
            }
        }
    }

    /// The FSM's current state, for telemetry.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Motion classification for the LED evaluator.
    pub fn led_mode(&self) -> LedMode {
        match self.state {
            AppState::Init => LedMode::Other,
            AppState::Idle => LedMode::Idle,
            AppState::IncFwd1 | AppState::IncFwd2 | AppState::FreeFwd => LedMode::Forward,
            AppState::IncBwd1 | AppState::IncBwd2 | AppState::FreeBwd => LedMode::Backward,
        }
    }
}
