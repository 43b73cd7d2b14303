//! Platform abstraction boundary.
//!
//! A single trait a board crate implements to supply this tick's raw
//! inputs and receive this tick's outputs. The kernel performs no I/O of
//! its own, so it stays host-testable with plain `std` unit tests, the
//! same way this codebase's math modules are tested without any
//! peripheral in sight.

use crate::motor_fsm::MotorDrive;
use crate::opto::OptoSample;

/// One tick's raw digital inputs, gathered by the board before calling
/// [`crate::kernel::Kernel::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inputs {
    pub button_forward: bool,
    pub button_backward: bool,
    pub feed_input: bool,
    pub opto: OptoSampleInput,
}

/// Newtype so [`Inputs`] can derive `Default` even though [`OptoSample`]
/// has no canonical default reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptoSampleInput(pub OptoSample);

impl Default for OptoSampleInput {
    fn default() -> Self {
        OptoSampleInput(OptoSample::Unused)
    }
}

/// One tick's outputs: the motor drive command and four LED duties, all
/// in the canonical `0..=PWM_STM32_MAX` range, plus whether the feed
/// blink is currently active. A board with no dedicated feed-LED pin
/// folds the latter onto LED3 itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outputs {
    pub motor: MotorDrive,
    pub led_duty: [u16; 4],
    pub feed_blink_active: bool,
}

/// Board-facing trait implemented by the driver crate. Left intentionally
/// minimal: the kernel only needs a place to read inputs and hand back
/// outputs, never raw register access.
pub trait Platform {
    fn read_inputs(&mut self) -> Inputs;
    fn apply_outputs(&mut self, outputs: Outputs);
}
