//! Configuration type definitions
//!
//! Every section has defaults matching the reference plotter build, so a
//! config file only needs to list what differs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::input::{ControlSample, InputMode};
use crate::motion::{
    MotionSmoother, Position, PositionIntegrator, SignalMapper, SignalRange, Workspace,
};

/// Target-mode input field (mm), origin at `(0, 0)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 240.0,
            height: 255.0,
        }
    }
}

impl FieldConfig {
    /// Center of the field, the substitute for malformed target readings
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Where control samples come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputSourceKind {
    /// Text lines over a serial console
    #[default]
    Console,
    /// Analog joystick on ADC channels
    Joystick,
}

/// Input configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct InputConfig {
    /// Signal (direction) or target (coordinate) samples
    pub mode: InputMode,
    /// Sample source
    pub source: InputSourceKind,
    /// Signal domain lower bound
    pub signal_min: i32,
    /// Signal domain upper bound
    pub signal_max: i32,
    /// Angle at `signal_min` (degrees)
    pub angle_min: f64,
    /// Angle at `signal_max` (degrees)
    pub angle_max: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Signal,
            source: InputSourceKind::Console,
            signal_min: 1000,
            signal_max: 2000,
            angle_min: 0.0,
            angle_max: 360.0,
        }
    }
}

impl InputConfig {
    /// Signal domain
    pub fn signal_range(&self) -> SignalRange {
        SignalRange::new(self.signal_min, self.signal_max)
    }
}

/// Motion configuration (mm)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MotionConfig {
    /// Distance moved per signal-mode update
    pub step_size: f64,
    /// Per-axis jump above which smoothing kicks in
    pub smooth_threshold: f64,
    /// Per-axis advance while smoothing
    pub smooth_step: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            step_size: 5.0,
            smooth_threshold: 10.0,
            smooth_step: 7.0,
        }
    }
}

/// Timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Wait between iterations
    pub loop_interval_ms: u32,
    /// Poll interval while waiting for the toggle button release
    pub debounce_poll_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loop_interval_ms: 20,
            debounce_poll_ms: 10,
        }
    }
}

/// Pen-lift servo angles (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PenConfig {
    pub up_angle: f64,
    pub down_angle: f64,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            up_angle: 0.0,
            down_angle: 30.0,
        }
    }
}

/// Actuator sink implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SinkKind {
    /// Drive the PWM outputs
    #[default]
    Hardware,
    /// Record commands without touching the outputs
    Simulated,
}

/// Actuator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ActuatorConfig {
    /// Sink selected at startup
    pub sink: SinkKind,
    /// 16-bit duty at the low end of each cable axis
    pub duty_min: u16,
    /// 16-bit duty at the high end of each cable axis
    pub duty_max: u16,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Hardware,
            duty_min: 1638,
            duty_max: 8192,
        }
    }
}

/// Complete plotter configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PlotterConfig {
    pub workspace: Workspace,
    pub field: FieldConfig,
    pub input: InputConfig,
    pub motion: MotionConfig,
    pub timing: TimingConfig,
    pub pen: PenConfig,
    pub actuator: ActuatorConfig,
}

impl PlotterConfig {
    /// Run every startup check
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.workspace.is_valid() {
            return Err(ConfigError::InvalidWorkspace);
        }

        let field = &self.field;
        if !(field.width.is_finite() && field.height.is_finite())
            || field.width <= 0.0
            || field.height <= 0.0
        {
            return Err(ConfigError::InvalidField);
        }

        if !(self.input.angle_min.is_finite() && self.input.angle_max.is_finite()) {
            return Err(ConfigError::InvalidAngleRange);
        }
        self.signal_mapper()?;
        self.integrator()?;
        self.smoother()?;

        if self.timing.debounce_poll_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        if !(self.pen.up_angle.is_finite() && self.pen.down_angle.is_finite()) {
            return Err(ConfigError::InvalidPenAngle);
        }

        if self.actuator.duty_min >= self.actuator.duty_max {
            return Err(ConfigError::InvalidDutyRange);
        }

        Ok(())
    }

    /// Signal mapper for the configured domain and angle range
    pub fn signal_mapper(&self) -> Result<SignalMapper, ConfigError> {
        SignalMapper::new(
            self.input.signal_range(),
            self.input.angle_min,
            self.input.angle_max,
        )
    }

    /// Integrator for the configured step size
    pub fn integrator(&self) -> Result<PositionIntegrator, ConfigError> {
        PositionIntegrator::new(self.motion.step_size)
    }

    /// Smoother for the configured threshold and step
    pub fn smoother(&self) -> Result<MotionSmoother, ConfigError> {
        MotionSmoother::new(self.motion.smooth_threshold, self.motion.smooth_step)
    }

    /// Documented default substituted for an unusable reading
    pub fn fallback_sample(&self, mode: InputMode) -> ControlSample {
        match mode {
            InputMode::Signal => ControlSample::Signal(self.input.signal_range().midpoint()),
            InputMode::Target => ControlSample::Target(self.field.center()),
        }
    }
}
