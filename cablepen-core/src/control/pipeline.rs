//! Sample to position transform
//!
//! Signal mode: map → integrate → clamp → smooth.
//! Target mode: clamp → smooth.
//!
//! Smoothing never passes its target and the current position is always
//! inside the workspace, so the output stays inside the workspace too.

use crate::config::{ConfigError, PlotterConfig};
use crate::input::{ControlSample, InputMode};
use crate::motion::{MotionSmoother, Position, PositionIntegrator, SignalMapper, Workspace};

/// Validated motion pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pipeline {
    mapper: SignalMapper,
    integrator: PositionIntegrator,
    workspace: Workspace,
    smoother: MotionSmoother,
    signal_fallback: ControlSample,
    target_fallback: ControlSample,
}

impl Pipeline {
    /// Build the pipeline, running every startup check
    pub fn from_config(config: &PlotterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mapper: config.signal_mapper()?,
            integrator: config.integrator()?,
            workspace: config.workspace,
            smoother: config.smoother()?,
            signal_fallback: config.fallback_sample(InputMode::Signal),
            target_fallback: config.fallback_sample(InputMode::Target),
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Power-on pen position
    pub fn home(&self) -> Position {
        self.workspace.center()
    }

    /// Default sample substituted for an unusable reading
    pub fn fallback(&self, mode: InputMode) -> ControlSample {
        match mode {
            InputMode::Signal => self.signal_fallback,
            InputMode::Target => self.target_fallback,
        }
    }

    /// Clamped, unsmoothed target for `sample` from `current`
    pub fn target(&self, current: Position, sample: ControlSample) -> Position {
        let candidate = match sample {
            ControlSample::Signal(signal) => {
                let angle = self.mapper.map(signal);
                self.integrator.step(current, angle)
            }
            ControlSample::Target(target) => target,
        };
        self.workspace.clamp(candidate)
    }

    /// Rate-limit the move from `current` toward a clamped target
    pub fn smooth(&self, current: Position, target: Position) -> Position {
        self.smoother.smooth(current, target)
    }

    /// Next commanded position
    pub fn advance(&self, current: Position, sample: ControlSample) -> Position {
        self.smooth(current, self.target(current, sample))
    }
}
