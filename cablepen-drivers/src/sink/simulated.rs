//! Simulated actuator sink
//!
//! Computes the duties the hardware would receive and keeps a bounded
//! history of commands. Used when the board runs without motors attached,
//! and by host tests.

use heapless::HistoryBuffer;

use crate::duty::{ActuatorDuties, DutyPlan};
use cablepen_core::motion::Displacement;
use cablepen_core::traits::{ActuatorCommand, ActuatorError, ActuatorSink};

/// Recording sink keeping the last `N` commands
pub struct SimulatedSink<const N: usize = 32> {
    plan: DutyPlan,
    history: HistoryBuffer<ActuatorCommand, N>,
    duties: Option<ActuatorDuties>,
    displacement: Displacement,
    applied: u32,
    released: bool,
}

impl<const N: usize> SimulatedSink<N> {
    pub fn new(plan: DutyPlan) -> Self {
        Self {
            plan,
            history: HistoryBuffer::new(),
            duties: None,
            displacement: Displacement::default(),
            applied: 0,
            released: false,
        }
    }

    /// Most recent command
    pub fn last_command(&self) -> Option<ActuatorCommand> {
        self.history.recent().copied()
    }

    /// Duties the hardware would have received for the last command
    pub fn last_duties(&self) -> Option<ActuatorDuties> {
        self.duties
    }

    /// Move between the last two commands
    pub fn displacement(&self) -> Displacement {
        self.displacement
    }

    /// Total commands applied, including those dropped from the history
    pub fn applied(&self) -> u32 {
        self.applied
    }

    /// Retained commands, oldest first
    pub fn history(&self) -> impl Iterator<Item = &ActuatorCommand> {
        self.history.oldest_ordered()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<const N: usize> ActuatorSink for SimulatedSink<N> {
    fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        if self.released {
            return Err(ActuatorError::Released);
        }

        self.displacement = match self.history.recent() {
            Some(prev) => prev.position.displacement_to(command.position),
            None => Displacement::default(),
        };
        self.duties = Some(self.plan.duties(command));
        self.history.write(command);
        self.applied = self.applied.wrapping_add(1);
        Ok(())
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        self.released = true;
        Ok(())
    }
}
