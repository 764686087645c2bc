//! Scoped actuator ownership
//!
//! The guard owns the sink for the lifetime of the loop. Release happens
//! exactly once: on the explicit shutdown path, or on drop if the loop is
//! abandoned (including unwinding in host tests).

use crate::traits::{ActuatorCommand, ActuatorError, ActuatorSink};

/// Owns an actuator sink and releases it exactly once
pub struct SinkGuard<A: ActuatorSink> {
    sink: A,
    released: bool,
}

impl<A: ActuatorSink> SinkGuard<A> {
    pub fn new(sink: A) -> Self {
        Self {
            sink,
            released: false,
        }
    }

    /// Forward a command; refused once released
    pub fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        if self.released {
            return Err(ActuatorError::Released);
        }
        self.sink.apply(command)
    }

    /// Release the sink
    ///
    /// The first call releases and reports the sink's result. Later calls
    /// do nothing and return `Ok`.
    pub fn release(&mut self) -> Result<(), ActuatorError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.sink.release()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Borrow the wrapped sink
    pub fn sink(&self) -> &A {
        &self.sink
    }
}

impl<A: ActuatorSink> Drop for SinkGuard<A> {
    fn drop(&mut self) {
        // Nothing left to report to on drop
        let _ = self.release();
    }
}
