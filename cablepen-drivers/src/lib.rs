//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cablepen-core on top of `embedded-hal` and `embedded-io`:
//!
//! - Duty mappings (cable axes, pen-lift servo)
//! - PWM actuator sink and a simulated sink
//! - Push buttons on digital inputs
//! - Console and analog joystick sample sources

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod duty;
pub mod input;
pub mod pwm;
pub mod sink;
