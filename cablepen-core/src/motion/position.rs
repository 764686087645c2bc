//! Pen position and the workspace envelope
//!
//! Positions are in millimeters. The workspace is the rectangular safe
//! envelope every commanded position is clamped into.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the drawing surface (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Per-axis displacement from `self` to `other`
    pub fn displacement_to(&self, other: Position) -> Displacement {
        Displacement {
            dx: other.x - self.x,
            dy: other.y - self.y,
        }
    }
}

/// Per-axis difference between two positions (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    /// Euclidean length of the displacement
    pub fn magnitude(&self) -> f64 {
        libm::hypot(self.dx, self.dy)
    }
}

/// Rectangular safe envelope for the pen
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Workspace {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            x_min: 40.0,
            x_max: 200.0,
            y_min: 40.0,
            y_max: 215.0,
        }
    }
}

impl Workspace {
    /// Create a workspace from its bounds
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Check the bounds form a non-empty rectangle of finite numbers
    pub fn is_valid(&self) -> bool {
        let finite = self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite();
        finite && self.x_min <= self.x_max && self.y_min <= self.y_max
    }

    /// Center of the workspace, the power-on pen position
    pub fn center(&self) -> Position {
        Position::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Check if a position lies inside the envelope (bounds inclusive)
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Saturate each axis independently into the envelope
    ///
    /// Never fails. A NaN coordinate saturates to the lower bound.
    pub fn clamp(&self, p: Position) -> Position {
        Position::new(
            saturate(p.x, self.x_min, self.x_max),
            saturate(p.y, self.y_min, self.y_max),
        )
    }
}

fn saturate(value: f64, min: f64, max: f64) -> f64 {
    // f64::max returns the non-NaN operand, so NaN lands on `min`
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_center() {
        let ws = Workspace::default();
        assert_eq!(ws.center(), Position::new(120.0, 127.5));
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        let ws = Workspace::default();
        let p = Position::new(125.0, 127.5);
        assert_eq!(ws.clamp(p), p);
    }

    #[test]
    fn test_clamp_each_axis() {
        let ws = Workspace::default();
        assert_eq!(ws.clamp(Position::new(0.0, 300.0)), Position::new(40.0, 215.0));
        assert_eq!(ws.clamp(Position::new(250.0, 10.0)), Position::new(200.0, 40.0));
        assert_eq!(ws.clamp(Position::new(100.0, -5.0)), Position::new(100.0, 40.0));
    }

    #[test]
    fn test_clamp_nan_saturates_low() {
        let ws = Workspace::default();
        let p = ws.clamp(Position::new(f64::NAN, f64::NAN));
        assert_eq!(p, Position::new(40.0, 40.0));
    }

    #[test]
    fn test_workspace_validity() {
        assert!(Workspace::default().is_valid());
        assert!(Workspace::new(10.0, 10.0, 0.0, 1.0).is_valid());
        assert!(!Workspace::new(20.0, 10.0, 0.0, 1.0).is_valid());
        assert!(!Workspace::new(0.0, f64::INFINITY, 0.0, 1.0).is_valid());
    }

    #[test]
    fn test_displacement() {
        let a = Position::new(40.0, 40.0);
        let b = Position::new(43.0, 44.0);
        let d = a.displacement_to(b);
        assert_eq!(d, Displacement { dx: 3.0, dy: 4.0 });
        assert!((d.magnitude() - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_clamp_within_bounds_and_idempotent(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let ws = Workspace::default();
            let once = ws.clamp(Position::new(x, y));
            prop_assert!(ws.contains(once));
            prop_assert_eq!(ws.clamp(once), once);
        }
    }
}
