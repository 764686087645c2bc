//! Duty cycle mappings
//!
//! All duties are on a 16-bit scale (`0..=65535` is 0-100%). The PWM
//! drivers rescale to the channel's real maximum when writing.

use cablepen_core::config::PlotterConfig;
use cablepen_core::state::PenState;
use cablepen_core::traits::ActuatorCommand;

/// Full-scale duty value
pub const DUTY_SCALE: u16 = u16::MAX;

/// Servo pulse period at 50 Hz (µs)
const SERVO_PERIOD_US: f64 = 20_000.0;

/// Duty for 0° (500 µs pulse)
pub const SERVO_DUTY_MIN: u16 = 1638;

/// Duty substituted above 180°
pub const SERVO_DUTY_MAX: u16 = 8192;

/// Convert a servo angle to a 16-bit duty cycle
///
/// `0..=180°` maps onto a 500..2500 µs pulse in a 20 ms period, truncated.
/// Angles above 180° give [`SERVO_DUTY_MAX`], below 0° (or NaN) give
/// [`SERVO_DUTY_MIN`].
pub fn servo_angle_to_duty(angle: f64) -> u16 {
    if angle > 180.0 {
        SERVO_DUTY_MAX
    } else if angle >= 0.0 {
        let pulse_us = 500.0 + 2000.0 * (angle / 180.0);
        (pulse_us * DUTY_SCALE as f64 / SERVO_PERIOD_US) as u16
    } else {
        SERVO_DUTY_MIN
    }
}

/// Linear map from a coordinate interval onto a duty range
///
/// Saturates outside the interval. On a zero-width interval, values at or
/// below it give `duty_min` and values above give `duty_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearDutyMap {
    pub in_min: f64,
    pub in_max: f64,
    pub duty_min: u16,
    pub duty_max: u16,
}

impl LinearDutyMap {
    pub const fn new(in_min: f64, in_max: f64, duty_min: u16, duty_max: u16) -> Self {
        Self {
            in_min,
            in_max,
            duty_min,
            duty_max,
        }
    }

    /// Duty for a coordinate
    pub fn map(&self, value: f64) -> u16 {
        let t = (value - self.in_min) / (self.in_max - self.in_min);
        // NaN (including 0/0) lands on 0
        let t = t.max(0.0).min(1.0);
        let span = self.duty_max as f64 - self.duty_min as f64;
        (self.duty_min as f64 + t * span) as u16
    }
}

/// Duties for one actuator command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorDuties {
    pub x: u16,
    pub y: u16,
    pub pen: u16,
}

/// Command → duty translation for both cable axes and the pen servo
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyPlan {
    pub x: LinearDutyMap,
    pub y: LinearDutyMap,
    /// Pen-up servo angle (degrees)
    pub up_angle: f64,
    /// Pen-down servo angle (degrees)
    pub down_angle: f64,
}

impl DutyPlan {
    /// Plan for the configured workspace, duty range and pen angles
    pub fn from_config(config: &PlotterConfig) -> Self {
        let ws = &config.workspace;
        let duty = &config.actuator;
        Self {
            x: LinearDutyMap::new(ws.x_min, ws.x_max, duty.duty_min, duty.duty_max),
            y: LinearDutyMap::new(ws.y_min, ws.y_max, duty.duty_min, duty.duty_max),
            up_angle: config.pen.up_angle,
            down_angle: config.pen.down_angle,
        }
    }

    /// Servo duty for a pen state
    pub fn pen_duty(&self, pen: PenState) -> u16 {
        match pen {
            PenState::Up => servo_angle_to_duty(self.up_angle),
            PenState::Down => servo_angle_to_duty(self.down_angle),
        }
    }

    pub fn duties(&self, command: ActuatorCommand) -> ActuatorDuties {
        ActuatorDuties {
            x: self.x.map(command.position.x),
            y: self.y.map(command.position.y),
            pen: self.pen_duty(command.pen),
        }
    }
}
