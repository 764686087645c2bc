//! Orchestration
//!
//! Ties input, the motion pipeline, the toggle debouncer and the actuator
//! sink into the periodic control loop.
//!
//! - [`Pipeline`]: pure sample → position transform
//! - [`SinkGuard`]: releases the actuator sink exactly once
//! - [`ControlLoop`]: the RUNNING/STOPPED loop itself

mod guard;
mod pipeline;
mod runner;

pub use guard::SinkGuard;
pub use pipeline::Pipeline;
pub use runner::{ControlLoop, Iteration, Shutdown};
