#![cfg_attr(not(test), no_std)]
//! Periodic control kernel for a mechanical parts-feeder.
//!
//! Two push-buttons, an external feed-request input, and an optical index
//! sensor drive a two-pin H-bridge motor and four status LEDs through a
//! fixed 1 kHz tick pipeline: button recognition, feed recognition,
//! opto-index debouncing, the application state machine, the motor state
//! machine, and the LED animator, in that order. The kernel performs no
//! I/O itself; see [`platform::Platform`] for the boundary a board crate
//! implements.

#[cfg(test)]
extern crate std;

pub mod app_fsm;
pub mod button;
pub mod config;
pub mod feed;
pub mod kernel;
pub mod led;
pub mod motor_fsm;
pub mod opto;
pub mod platform;
pub mod sine;

pub use app_fsm::AppFsm;
pub use button::{Button, ButtonEvent};
pub use feed::{FeedRecognizer, FeedSignal};
pub use kernel::{Heartbeat, Kernel};
pub use led::{LedEvaluator, LedFrame, LedMode};
pub use motor_fsm::{MotorCommand, MotorDrive, MotorFsm};
pub use opto::{OptoIndex, OptoSample, OptoSource};
pub use platform::{Inputs, Outputs, Platform};
