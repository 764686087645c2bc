//! Board actuator sink
//!
//! Hardware or simulated, picked at boot from the configuration.

use defmt::*;
use embassy_rp::pwm::PwmOutput;

use cablepen_core::traits::{ActuatorCommand, ActuatorError, ActuatorSink};
use cablepen_drivers::sink::{PwmSink, SimulatedSink};

/// X cable, Y cable, pen servo
pub type HardwareSink = PwmSink<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

/// Actuator sink selected at boot
pub enum BoardSink {
    Hardware(HardwareSink),
    Simulated(SimulatedSink),
}

impl ActuatorSink for BoardSink {
    fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        match self {
            BoardSink::Hardware(sink) => sink.apply(command),
            BoardSink::Simulated(sink) => {
                sink.apply(command)?;
                if let Some(duties) = sink.last_duties() {
                    trace!(
                        "sim duties x={} y={} pen={}",
                        duties.x,
                        duties.y,
                        duties.pen
                    );
                }
                Ok(())
            }
        }
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        match self {
            BoardSink::Hardware(sink) => sink.release(),
            BoardSink::Simulated(sink) => {
                info!("Simulated sink released after {} commands", sink.applied());
                sink.release()
            }
        }
    }
}
