//! Motion pipeline
//!
//! The stages a control sample passes through before reaching the
//! actuators:
//!
//! - [`SignalMapper`]: raw signal → direction angle
//! - [`PositionIntegrator`]: position + angle → candidate position
//! - [`Workspace`]: candidate → position inside the safe envelope
//! - [`MotionSmoother`]: per-axis rate limit against the last command

pub mod integrator;
pub mod mapper;
pub mod position;
pub mod smoother;

pub use integrator::PositionIntegrator;
pub use mapper::{Angle, SignalMapper, SignalRange};
pub use position::{Displacement, Position, Workspace};
pub use smoother::MotionSmoother;
