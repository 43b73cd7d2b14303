#![cfg_attr(not(test), no_std)]
//! Board-support layer for the parts-feeder controller: pin map, PWM
//! drivers, ADC sampling, and the [`board::Board`] that implements
//! [`feeder_core::platform::Platform`].

pub mod adc;
pub mod board;
pub mod pinout;
pub mod pwm;

pub use board::{Board, OptoWiring};
