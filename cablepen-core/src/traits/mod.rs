//! Capability traits
//!
//! These traits define the interface between the control loop and the
//! outside world. Hardware-backed and simulated implementations live in
//! the drivers crate; the loop is written once against these traits.

pub mod actuator;
pub mod input;

pub use actuator::{ActuatorCommand, ActuatorError, ActuatorSink};
pub use input::{ButtonInput, InputSource, StopCondition};
