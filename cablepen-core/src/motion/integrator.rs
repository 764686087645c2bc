//! Position integration
//!
//! Moves the pen a fixed distance in the commanded direction. No clamping
//! happens here; every candidate must pass through the workspace clamp.

use super::mapper::Angle;
use super::position::Position;
use crate::config::ConfigError;

/// Advance `current` by `step_size` mm along `angle`
pub fn step(current: Position, angle: Angle, step_size: f64) -> Position {
    let radians = angle.radians();
    Position::new(
        current.x + step_size * libm::cos(radians),
        current.y + step_size * libm::sin(radians),
    )
}

/// Fixed-step integrator
///
/// The step size is fixed for the lifetime of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionIntegrator {
    step_size: f64,
}

impl PositionIntegrator {
    /// Create an integrator; the step size must be a positive finite number
    pub fn new(step_size: f64) -> Result<Self, ConfigError> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(ConfigError::NonPositiveStepSize);
        }
        Ok(Self { step_size })
    }

    /// Distance moved per update (mm)
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Candidate position one step along `angle`
    pub fn step(&self, current: Position, angle: Angle) -> Position {
        step(current, angle, self.step_size)
    }
}
