//! Input traits
//!
//! Control samples, the pen toggle button, and the stop condition are all
//! polled synchronously by the loop. Any of them may block.

use crate::input::{ControlSample, InputError, InputMode};

/// Source of control samples (joystick, console, scripted)
pub trait InputSource {
    /// Which kind of sample this source produces
    fn mode(&self) -> InputMode;

    /// Acquire the next sample
    ///
    /// May block on hardware or console. Errors never stop the loop; they
    /// are replaced by the mode's default sample.
    fn read(&mut self) -> Result<ControlSample, InputError>;
}

/// Instantaneous digital level of a push button
pub trait ButtonInput {
    /// Check if the button currently reads pressed (raw level 1)
    fn is_pressed(&mut self) -> bool;
}

/// Condition checked once per iteration boundary
pub trait StopCondition {
    /// Check if the loop should stop
    fn stop_requested(&mut self) -> bool;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn mode(&self) -> InputMode {
        T::mode(self)
    }

    fn read(&mut self) -> Result<ControlSample, InputError> {
        T::read(self)
    }
}

impl<T: ButtonInput + ?Sized> ButtonInput for &mut T {
    fn is_pressed(&mut self) -> bool {
        T::is_pressed(self)
    }
}

impl<T: StopCondition + ?Sized> StopCondition for &mut T {
    fn stop_requested(&mut self) -> bool {
        T::stop_requested(self)
    }
}
