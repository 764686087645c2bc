//! Signal to direction mapping
//!
//! A joystick/PWM reading is a bounded integer (pulse width in µs for the
//! default domain). It is saturated into the domain and interpolated onto
//! an angle range.

use core::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Direction in degrees, conceptually periodic modulo 360
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(pub f64);

impl Angle {
    /// Create an angle from degrees
    pub const fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Angle in degrees
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Angle in radians
    pub fn radians(self) -> f64 {
        self.0 * (PI / 180.0)
    }

    /// Equivalent angle in `[0, 360)`
    pub fn normalized(self) -> Self {
        let wrapped = libm::fmod(self.0, 360.0);
        if wrapped < 0.0 {
            Self(wrapped + 360.0)
        } else {
            Self(wrapped)
        }
    }

    /// The reverse direction (+180°)
    pub fn opposite(self) -> Self {
        Self(self.0 + 180.0)
    }
}

/// Raw signal domain
///
/// `min > max` describes an inverted stick; only `min == max` is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalRange {
    pub min: i32,
    pub max: i32,
}

impl Default for SignalRange {
    fn default() -> Self {
        Self {
            min: 1000,
            max: 2000,
        }
    }
}

impl SignalRange {
    /// Create a signal range
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Midpoint of the domain, the substitute for malformed readings
    pub fn midpoint(&self) -> i32 {
        // i64 avoids overflow for extreme configured bounds; odd sums floor
        (self.min as i64 + self.max as i64).div_euclid(2) as i32
    }

    /// Saturate a reading into the domain
    pub fn clamp(&self, signal: i32) -> i32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        signal.clamp(lo, hi)
    }
}

/// Affine signal → angle mapper with input saturation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalMapper {
    domain: SignalRange,
    angle_min: f64,
    angle_max: f64,
}

impl SignalMapper {
    /// Create a mapper
    ///
    /// Fails if the domain is a single point (the interpolation would divide
    /// by zero). This is a startup check; `map` itself never fails.
    pub fn new(domain: SignalRange, angle_min: f64, angle_max: f64) -> Result<Self, ConfigError> {
        if domain.min == domain.max {
            return Err(ConfigError::DegenerateSignalDomain);
        }
        Ok(Self {
            domain,
            angle_min,
            angle_max,
        })
    }

    /// Mapper for the default joystick: 1000..2000 µs onto 0..360°
    pub fn joystick() -> Self {
        Self {
            domain: SignalRange::default(),
            angle_min: 0.0,
            angle_max: 360.0,
        }
    }

    /// The configured signal domain
    pub fn domain(&self) -> SignalRange {
        self.domain
    }

    /// Map a raw reading onto the angle range
    pub fn map(&self, signal: i32) -> Angle {
        let clamped = self.domain.clamp(signal);
        let span = self.domain.max as f64 - self.domain.min as f64;
        let offset = clamped as f64 - self.domain.min as f64;
        Angle::from_degrees(self.angle_min + offset * (self.angle_max - self.angle_min) / span)
    }
}
