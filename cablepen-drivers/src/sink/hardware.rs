//! PWM actuator sink
//!
//! Both cable axes and the pen servo run at 50 Hz. Release drives every
//! output fully off; the servo goes limp rather than holding its last angle.

use embedded_hal::pwm::SetDutyCycle;

use crate::duty::{ActuatorDuties, DutyPlan};
use crate::pwm::PwmChannel;
use cablepen_core::traits::{ActuatorCommand, ActuatorError, ActuatorSink};

/// Hardware sink over three PWM channels
pub struct PwmSink<X, Y, W> {
    x: PwmChannel<X>,
    y: PwmChannel<Y>,
    pen: PwmChannel<W>,
    plan: DutyPlan,
    last: Option<ActuatorDuties>,
    released: bool,
}

impl<X, Y, W> PwmSink<X, Y, W>
where
    X: SetDutyCycle,
    Y: SetDutyCycle,
    W: SetDutyCycle,
{
    /// Take ownership of the channels
    ///
    /// Nothing is written until the first command.
    pub fn new(x: X, y: Y, pen: W, plan: DutyPlan) -> Self {
        Self {
            x: PwmChannel::new(x),
            y: PwmChannel::new(y),
            pen: PwmChannel::new(pen),
            plan,
            last: None,
            released: false,
        }
    }

    /// Duties of the last fully applied command
    pub fn last_duties(&self) -> Option<ActuatorDuties> {
        self.last
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl<X, Y, W> ActuatorSink for PwmSink<X, Y, W>
where
    X: SetDutyCycle,
    Y: SetDutyCycle,
    W: SetDutyCycle,
{
    fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        if self.released {
            return Err(ActuatorError::Released);
        }

        let duties = self.plan.duties(command);
        self.x.write(duties.x)?;
        self.y.write(duties.y)?;
        self.pen.write(duties.pen)?;
        self.last = Some(duties);
        Ok(())
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        // Attempt every channel, report the first failure
        let x = self.x.off();
        let y = self.y.off();
        let pen = self.pen.off();
        x.and(y).and(pen)
    }
}
