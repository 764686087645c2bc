//! Analog joystick input
//!
//! The stick's potentiometers are read as raw ADC counts. In signal mode
//! the X channel is scaled onto the signal domain; in target mode both
//! channels are scaled onto the input field.

use cablepen_core::config::FieldConfig;
use cablepen_core::input::{ControlSample, InputError, InputMode};
use cablepen_core::motion::{Position, SignalRange};
use cablepen_core::traits::InputSource;

/// Largest count of a 12-bit converter
pub const ADC_FULL_SCALE: u16 = 4095;

/// Joystick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickAxis {
    X,
    Y,
}

/// Raw analog readings, one channel per axis
pub trait AnalogSource {
    /// Blocking conversion of one axis
    fn sample(&mut self, axis: JoystickAxis) -> Result<u16, InputError>;
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    fn sample(&mut self, axis: JoystickAxis) -> Result<u16, InputError> {
        T::sample(self, axis)
    }
}

/// Joystick sample source
pub struct AnalogJoystick<A> {
    source: A,
    mode: InputMode,
    signal: SignalRange,
    field: FieldConfig,
    full_scale: u16,
}

impl<A: AnalogSource> AnalogJoystick<A> {
    /// Create a joystick for a 12-bit converter
    pub fn new(source: A, mode: InputMode, signal: SignalRange, field: FieldConfig) -> Self {
        Self {
            source,
            mode,
            signal,
            field,
            full_scale: ADC_FULL_SCALE,
        }
    }

    /// Override the converter's full-scale count
    pub fn with_full_scale(mut self, full_scale: u16) -> Self {
        self.full_scale = full_scale;
        self
    }

    /// Read an axis as a fraction of full scale
    ///
    /// Counts above full scale cannot come from a healthy converter.
    fn fraction(&mut self, axis: JoystickAxis) -> Result<f64, InputError> {
        let count = self.source.sample(axis)?;
        if count > self.full_scale || self.full_scale == 0 {
            return Err(InputError::Malformed);
        }
        Ok(count as f64 / self.full_scale as f64)
    }
}

impl<A: AnalogSource> InputSource for AnalogJoystick<A> {
    fn mode(&self) -> InputMode {
        self.mode
    }

    fn read(&mut self) -> Result<ControlSample, InputError> {
        match self.mode {
            InputMode::Signal => {
                let t = self.fraction(JoystickAxis::X)?;
                let min = self.signal.min as f64;
                let span = self.signal.max as f64 - min;
                Ok(ControlSample::Signal((min + t * span) as i32))
            }
            InputMode::Target => {
                let tx = self.fraction(JoystickAxis::X)?;
                let ty = self.fraction(JoystickAxis::Y)?;
                Ok(ControlSample::Target(Position::new(
                    tx * self.field.width,
                    ty * self.field.height,
                )))
            }
        }
    }
}
