//! Board-agnostic core logic for the cable plotter firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits (input source, actuator sink, buttons, stop conditions)
//! - Motion pipeline (signal mapping, integration, workspace clamp, smoothing)
//! - Toggle debouncing for the pen-lift button
//! - Loop state machine and the orchestration loop
//! - Configuration types, validation and the config text parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod input;
pub mod motion;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
