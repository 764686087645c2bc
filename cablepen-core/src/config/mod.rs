//! Configuration
//!
//! Board-agnostic configuration structures, their startup validation, and
//! a parser for the TOML subset used by the embedded config file.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;

/// Startup configuration errors
///
/// Fatal: the loop is never entered with an invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Signal domain bounds are equal (interpolation would divide by zero)
    DegenerateSignalDomain,
    /// Angle range bound is not a finite number
    InvalidAngleRange,
    /// Step size is zero, negative, or not finite
    NonPositiveStepSize,
    /// Workspace bounds are inverted or not finite
    InvalidWorkspace,
    /// Smoothing threshold or step out of range
    InvalidSmoothing,
    /// Input field dimensions are not positive
    InvalidField,
    /// Duty range is empty or inverted
    InvalidDutyRange,
    /// Pen servo angle is not a finite number
    InvalidPenAngle,
    /// Debounce poll interval is zero
    ZeroInterval,
    /// Input source produces samples for the other input mode
    InputModeMismatch,
}
