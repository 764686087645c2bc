//! Per-axis rate limiting
//!
//! Protects the cable mechanism from large discontinuous moves. When an
//! axis wants to jump further than the threshold, it only advances by the
//! smoothing step toward the target. Repeated updates close the gap; there
//! is no arrival deadline.
//!
//! The smoother has no notion of wall-clock time. The loop's fixed
//! inter-iteration delay turns the step into a bounded velocity.

use super::position::Position;
use crate::config::ConfigError;

/// Rate-limit one axis
///
/// A limited move never passes the target, so a target inside the workspace
/// keeps the result inside the workspace.
pub fn smooth_axis(prev: f64, target: f64, threshold: f64, step: f64) -> f64 {
    let delta = target - prev;
    let distance = libm::fabs(delta);
    if distance > threshold {
        let advance = step.min(distance);
        if delta > 0.0 {
            prev + advance
        } else {
            prev - advance
        }
    } else {
        target
    }
}

/// Rate-limit both axes independently
pub fn smooth(prev: Position, target: Position, threshold: f64, step: f64) -> Position {
    Position::new(
        smooth_axis(prev.x, target.x, threshold, step),
        smooth_axis(prev.y, target.y, threshold, step),
    )
}

/// Configured motion smoother
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSmoother {
    threshold: f64,
    step: f64,
}

impl MotionSmoother {
    /// Create a smoother
    ///
    /// The threshold must be finite and non-negative, the step finite and
    /// positive.
    pub fn new(threshold: f64, step: f64) -> Result<Self, ConfigError> {
        let threshold_ok = threshold.is_finite() && threshold >= 0.0;
        let step_ok = step.is_finite() && step > 0.0;
        if !(threshold_ok && step_ok) {
            return Err(ConfigError::InvalidSmoothing);
        }
        Ok(Self { threshold, step })
    }

    /// Jump size above which an axis is rate limited (mm)
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Per-update advance while limited (mm)
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Limit the move from `prev` toward `target`
    pub fn smooth(&self, prev: Position, target: Position) -> Position {
        smooth(prev, target, self.threshold, self.step)
    }
}
