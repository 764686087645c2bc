//! Host-side test doubles for the capability traits

use embedded_hal::delay::DelayNs;

use crate::input::{parse_sample, ControlSample, InputError, InputMode};
use crate::traits::{ActuatorCommand, ActuatorError, ActuatorSink, ButtonInput, InputSource};

/// Button replaying a fixed sequence of levels, then reading released
pub struct ScriptedButton {
    levels: Vec<bool>,
    reads: usize,
}

impl ScriptedButton {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.to_vec(),
            reads: 0,
        }
    }

    pub fn released() -> Self {
        Self::new(&[])
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ButtonInput for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        let level = self.levels.get(self.reads).copied().unwrap_or(false);
        self.reads += 1;
        level
    }
}

/// Delay that records requests instead of sleeping
#[derive(Default)]
pub struct CountingDelay {
    pub ms_calls: Vec<u32>,
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms_calls.push(ms);
        self.total_ns += ms as u64 * 1_000_000;
    }
}

/// Input replaying scripted readings, then reporting unavailable
pub struct ScriptedInput {
    mode: InputMode,
    readings: Vec<Result<ControlSample, InputError>>,
    next: usize,
}

impl ScriptedInput {
    pub fn new(mode: InputMode, readings: &[Result<ControlSample, InputError>]) -> Self {
        Self {
            mode,
            readings: readings.to_vec(),
            next: 0,
        }
    }

    pub fn signals(values: &[i32]) -> Self {
        let readings: Vec<_> = values.iter().map(|&v| Ok(ControlSample::Signal(v))).collect();
        Self::new(InputMode::Signal, &readings)
    }

    /// Readings parsed from console-style text lines
    pub fn lines(mode: InputMode, lines: &[&str]) -> Self {
        let readings: Vec<_> = lines.iter().map(|line| parse_sample(mode, line)).collect();
        Self::new(mode, &readings)
    }
}

impl InputSource for ScriptedInput {
    fn mode(&self) -> InputMode {
        self.mode
    }

    fn read(&mut self) -> Result<ControlSample, InputError> {
        let reading = self
            .readings
            .get(self.next)
            .copied()
            .unwrap_or(Err(InputError::Unavailable));
        self.next += 1;
        reading
    }
}

/// Sink recording every command, optionally failing from a given command on
#[derive(Default)]
pub struct RecordingSink {
    pub commands: Vec<ActuatorCommand>,
    pub releases: u32,
    pub fail_from: Option<usize>,
    pub release_error: Option<ActuatorError>,
}

impl RecordingSink {
    pub fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Default::default()
        }
    }
}

impl ActuatorSink for RecordingSink {
    fn apply(&mut self, command: ActuatorCommand) -> Result<(), ActuatorError> {
        if self.releases > 0 {
            return Err(ActuatorError::Released);
        }
        if self.fail_from.is_some_and(|index| self.commands.len() >= index) {
            return Err(ActuatorError::Pwm);
        }
        self.commands.push(command);
        Ok(())
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        self.releases += 1;
        match self.release_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
