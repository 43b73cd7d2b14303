//! Motor drive state machine.
//!
//! Translates an [`AppFsm`](crate::app_fsm::AppFsm)-issued [`MotorCommand`]
//! into a [`MotorDrive`] PWM command, inserting an active-braking phase
//! whenever the requested direction reverses or stops a spinning motor.
//!
//! The brake phase reasserts its drive value on every tick it is active,
//! including the final tick before the state machine lets the next
//! command take over — there is no implicit register latching here the
//! way there is in hardware, so the value has to be handed back
//! explicitly each time or the platform would see a one-tick gap.

use crate::config::{MOTOR_BACKWARD_TARGET, MOTOR_BRAKE_TICKS, MOTOR_FORWARD_TARGET};

/// Direction requested by the application FSM for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCommand {
    Stop,
    Forward,
    Backward,
}

/// Canonical motor drive command, `-PWM_STM32_MAX..=PWM_STM32_MAX`.
/// Positive is forward, negative is backward, zero is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorDrive {
    pub duty: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MotorState {
    Idle,
    Running(i16),
    Brake { remaining: u8, drive: i16 },
}

/// Motor state machine: idle / running / braking.
pub struct MotorFsm {
    state: MotorState,
}

impl Default for MotorFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorFsm {
    pub const fn new() -> Self {
        MotorFsm {
            state: MotorState::Idle,
        }
    }

    /// Advances the motor FSM by one tick given this tick's commanded
    /// direction, returning the drive value to apply.
    pub fn tick(&mut self, command: MotorCommand) -> MotorDrive {
        match self.state {
            MotorState::Brake { remaining, drive } => {
                if command != MotorCommand::Stop {
                    // A nonzero target arrived mid-brake: abort into idle
                    // immediately rather than waiting out the countdown.
                    // The caller re-enters running on a later tick, once
                    // idle sees the nonzero command again.
                    self.state = MotorState::Idle;
                } else if remaining > 1 {
                    self.state = MotorState::Brake {
                        remaining: remaining - 1,
                        drive,
                    };
                } else {
                    self.state = MotorState::Idle;
                }
                MotorDrive { duty: drive }
            }
            MotorState::Idle => match command {
                MotorCommand::Stop => MotorDrive { duty: 0 },
                MotorCommand::Forward => {
                    self.state = MotorState::Running(MOTOR_FORWARD_TARGET);
                    MotorDrive {
                        duty: MOTOR_FORWARD_TARGET,
                    }
                }
                MotorCommand::Backward => {
                    self.state = MotorState::Running(MOTOR_BACKWARD_TARGET);
                    MotorDrive {
                        duty: MOTOR_BACKWARD_TARGET,
                    }
                }
            },
            MotorState::Running(drive) => {
                let running_forward = drive > 0;
                let still_matches = match command {
                    MotorCommand::Forward => running_forward,
                    MotorCommand::Backward => !running_forward,
                    MotorCommand::Stop => false,
                };
                if still_matches {
                    MotorDrive { duty: drive }
                } else {
                    let brake_drive = -drive;
                    self.state = MotorState::Brake {
                        // This tick itself is the first of MOTOR_BRAKE_TICKS
                        // brake-duty ticks, so only N-1 remain afterward.
                        remaining: MOTOR_BRAKE_TICKS - 1,
                        drive: brake_drive,
                    };
                    MotorDrive { duty: brake_drive }
                }
            }
        }
    }

    pub fn is_braking(&self) -> bool {
        matches!(self.state, MotorState::Brake { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_stays_off_on_stop() {
        let mut motor = MotorFsm::new();
        for _ in 0..5 {
            assert_eq!(motor.tick(MotorCommand::Stop).duty, 0);
        }
    }

    #[test]
    fn forward_command_drives_to_target_immediately() {
        let mut motor = MotorFsm::new();
        assert_eq!(motor.tick(MotorCommand::Forward).duty, MOTOR_FORWARD_TARGET);
        assert_eq!(motor.tick(MotorCommand::Forward).duty, MOTOR_FORWARD_TARGET);
    }

    #[test]
    fn reversal_enters_brake_with_opposite_sign() {
        let mut motor = MotorFsm::new();
        motor.tick(MotorCommand::Forward);
        let brake = motor.tick(MotorCommand::Backward);
        assert_eq!(brake.duty, -MOTOR_FORWARD_TARGET);
        assert!(motor.is_braking());
    }

    #[test]
    fn brake_value_is_reasserted_every_tick_until_expiry() {
        let mut motor = MotorFsm::new();
        motor.tick(MotorCommand::Forward);
        let expected = -MOTOR_FORWARD_TARGET;
        let first_brake = motor.tick(MotorCommand::Stop);
        assert_eq!(first_brake.duty, expected);

        let mut ticks_in_brake = 1u32;
        while motor.is_braking() {
            let out = motor.tick(MotorCommand::Stop);
            assert_eq!(out.duty, expected);
            ticks_in_brake += 1;
            assert!(ticks_in_brake <= MOTOR_BRAKE_TICKS as u32 + 1);
        }
        assert_eq!(ticks_in_brake, MOTOR_BRAKE_TICKS as u32);
    }

    #[test]
    fn brake_resolves_into_requested_command_after_stop_persists() {
        let mut motor = MotorFsm::new();
        motor.tick(MotorCommand::Forward);
        motor.tick(MotorCommand::Backward);
        while motor.is_braking() {
            motor.tick(MotorCommand::Stop);
        }
        assert_eq!(motor.tick(MotorCommand::Backward).duty, MOTOR_BACKWARD_TARGET);
    }

    #[test]
    fn nonzero_target_aborts_brake_immediately() {
        let mut motor = MotorFsm::new();
        motor.tick(MotorCommand::Forward);
        motor.tick(MotorCommand::Backward);
        assert!(motor.is_braking());

        // A nonzero command on the very next tick aborts the brake right
        // away rather than waiting out the remaining countdown.
        motor.tick(MotorCommand::Backward);
        assert!(!motor.is_braking());
        assert_eq!(motor.tick(MotorCommand::Backward).duty, MOTOR_BACKWARD_TARGET);
    }

    #[test]
    fn stopping_a_running_motor_brakes_then_idles() {
        let mut motor = MotorFsm::new();
        motor.tick(MotorCommand::Forward);
        motor.tick(MotorCommand::Stop);
        while motor.is_braking() {
            motor.tick(MotorCommand::Stop);
        }
        assert_eq!(motor.tick(MotorCommand::Stop).duty, 0);
    }
}
