//! Loop state machine
//!
//! RUNNING is the only initial state; STOPPED is terminal. Every exit path
//! goes through a transition so the shutdown sequence sees the reason.

use super::events::Event;
use crate::traits::ActuatorError;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopReason {
    /// Operator or external cancellation
    Requested,
    /// Unrecoverable actuator failure
    ActuatorFault(ActuatorError),
}

/// Orchestration loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Iterating
    #[default]
    Running,
    /// Terminal; actuator resources are being or have been released
    Stopped(StopReason),
}

impl LoopState {
    /// Check if the loop should keep iterating
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }

    /// Stop reason, if stopped
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            LoopState::Running => None,
            LoopState::Stopped(reason) => Some(*reason),
        }
    }

    /// Process an event and return the next state
    ///
    /// STOPPED absorbs every event; the first reason wins.
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            (LoopState::Running, Event::StopRequested) => LoopState::Stopped(StopReason::Requested),
            (LoopState::Running, Event::ActuatorFault(e)) => {
                LoopState::Stopped(StopReason::ActuatorFault(e))
            }
            (LoopState::Stopped(_), _) => self,
        }
    }
}
