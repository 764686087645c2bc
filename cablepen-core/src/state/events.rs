//! Events that trigger loop state transitions

use crate::traits::ActuatorError;

/// Events that can stop the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Stop button pressed or external cancellation observed
    StopRequested,
    /// The actuator sink rejected a command
    ActuatorFault(ActuatorError),
}

impl Event {
    /// Check if this event indicates a hardware fault
    pub fn is_fault(&self) -> bool {
        matches!(self, Event::ActuatorFault(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_events() {
        assert!(Event::ActuatorFault(ActuatorError::Pwm).is_fault());
        assert!(!Event::StopRequested.is_fault());
    }
}
