//! Control samples
//!
//! A sample is either a raw signal (mapped to a direction) or a raw target
//! coordinate (clamped directly). Text parsing is shared by line-oriented
//! sources such as a serial console.

use core::num::IntErrorKind;

use crate::motion::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of samples the loop consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputMode {
    /// Bounded integer signal mapped to a direction angle
    #[default]
    Signal,
    /// Direct 2D target coordinate
    Target,
}

/// One control sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlSample {
    /// Raw signal value (µs for a joystick PWM input)
    Signal(i32),
    /// Requested pen position (mm)
    Target(Position),
}

impl ControlSample {
    /// Mode this sample belongs to
    pub fn mode(&self) -> InputMode {
        match self {
            ControlSample::Signal(_) => InputMode::Signal,
            ControlSample::Target(_) => InputMode::Target,
        }
    }
}

/// Errors from input sources
///
/// Never propagated past the loop; a default sample is substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Non-numeric, non-finite, or wrongly shaped reading
    Malformed,
    /// The source could not produce a reading
    Unavailable,
    /// The source produced a sample for the other input mode
    ModeMismatch,
}

/// Parse a signal reading like `"1500"`
///
/// Integers too large for `i32` saturate so the mapper clamps them like any
/// other out-of-range reading.
pub fn parse_signal(text: &str) -> Result<i32, InputError> {
    text.trim().parse().or_else(|e: core::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => Ok(i32::MAX),
        IntErrorKind::NegOverflow => Ok(i32::MIN),
        _ => Err(InputError::Malformed),
    })
}

/// Parse a target coordinate like `"120.5, 80"` or `"120.5 80"`
pub fn parse_target(text: &str) -> Result<Position, InputError> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());

    let x = parse_coordinate(parts.next())?;
    let y = parse_coordinate(parts.next())?;
    if parts.next().is_some() {
        return Err(InputError::Malformed);
    }
    Ok(Position::new(x, y))
}

fn parse_coordinate(part: Option<&str>) -> Result<f64, InputError> {
    let value: f64 = part
        .ok_or(InputError::Malformed)?
        .parse()
        .map_err(|_| InputError::Malformed)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::Malformed)
    }
}

/// Parse a line of text as a sample for `mode`
pub fn parse_sample(mode: InputMode, text: &str) -> Result<ControlSample, InputError> {
    match mode {
        InputMode::Signal => parse_signal(text).map(ControlSample::Signal),
        InputMode::Target => parse_target(text).map(ControlSample::Target),
    }
}
