//! Actuator sink trait
//!
//! The sink receives the full observable state each iteration and turns it
//! into hardware commands (or records it, for the simulated sink).

use crate::motion::Position;
use crate::state::PenState;

/// Full observable plotter state forwarded to the actuators
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand {
    /// Pen position, always inside the workspace
    pub position: Position,
    /// Pen-lift state
    pub pen: PenState,
}

impl ActuatorCommand {
    /// Create a command
    pub const fn new(position: Position, pen: PenState) -> Self {
        Self { position, pen }
    }
}

/// Errors that can occur when commanding actuators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// PWM channel rejected a duty cycle
    Pwm,
    /// Hardware refused the command
    Rejected,
    /// Command issued after the sink was released
    Released,
}

/// Trait for actuator sinks
///
/// Resources are acquired when the sink is constructed and released exactly
/// once through [`ActuatorSink::release`]. Callers must not issue commands
/// after release.
pub trait ActuatorSink {
    /// Command the cable motors and pen-lift servo
    fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError>;

    /// Stop driving outputs and release hardware resources
    fn release(&mut self) -> Result<(), ActuatorError>;
}

impl<T: ActuatorSink + ?Sized> ActuatorSink for &mut T {
    fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        T::apply(self, command)
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        T::release(self)
    }
}
