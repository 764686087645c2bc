//! Pen-lift state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary pen-lift state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PenState {
    /// Pen lifted off the paper (power-on state)
    #[default]
    Up,
    /// Pen touching the paper
    Down,
}

impl PenState {
    /// The other state
    pub fn toggled(self) -> Self {
        match self {
            PenState::Up => PenState::Down,
            PenState::Down => PenState::Up,
        }
    }

    /// Check if the pen is drawing
    pub fn is_down(self) -> bool {
        self == PenState::Down
    }
}
