//! Actuator sinks
//!
//! - [`PwmSink`]: drives two cable PWM channels and the pen-lift servo
//! - [`SimulatedSink`]: records commands for bench runs and tests

mod hardware;
mod simulated;

pub use hardware::PwmSink;
pub use simulated::SimulatedSink;
