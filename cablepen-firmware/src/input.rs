//! Board input adapters
//!
//! The loop is generic over its input source, but the source is picked at
//! boot from the configuration. [`BoardInput`] dispatches to whichever one
//! was built.

use embassy_rp::adc::{Adc, Blocking as AdcBlocking, Channel};
use embassy_rp::uart::{Blocking, UartRx};
use embedded_io::{ErrorKind, ErrorType, Read};

use cablepen_core::input::{ControlSample, InputError, InputMode};
use cablepen_core::traits::InputSource;
use cablepen_drivers::input::{AnalogJoystick, AnalogSource, ConsoleInput, JoystickAxis};

/// Blocking byte reader over the UART0 receiver
pub struct UartReader {
    rx: UartRx<'static, Blocking>,
}

impl UartReader {
    pub fn new(rx: UartRx<'static, Blocking>) -> Self {
        Self { rx }
    }
}

impl ErrorType for UartReader {
    type Error = ErrorKind;
}

impl Read for UartReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        // One byte at a time; blocks until it arrives
        self.rx
            .blocking_read(&mut buf[..1])
            .map_err(|_| ErrorKind::Other)?;
        Ok(1)
    }
}

/// Joystick potentiometers on two ADC channels
pub struct AdcSticks {
    adc: Adc<'static, AdcBlocking>,
    x: Channel<'static>,
    y: Channel<'static>,
}

impl AdcSticks {
    pub fn new(adc: Adc<'static, AdcBlocking>, x: Channel<'static>, y: Channel<'static>) -> Self {
        Self { adc, x, y }
    }
}

impl AnalogSource for AdcSticks {
    fn sample(&mut self, axis: JoystickAxis) -> Result<u16, InputError> {
        let channel = match axis {
            JoystickAxis::X => &mut self.x,
            JoystickAxis::Y => &mut self.y,
        };
        self.adc
            .blocking_read(channel)
            .map_err(|_| InputError::Unavailable)
    }
}

/// Input source selected at boot
pub enum BoardInput {
    Console(ConsoleInput<UartReader>),
    Joystick(AnalogJoystick<AdcSticks>),
}

impl InputSource for BoardInput {
    fn mode(&self) -> InputMode {
        match self {
            BoardInput::Console(input) => input.mode(),
            BoardInput::Joystick(input) => input.mode(),
        }
    }

    fn read(&mut self) -> Result<ControlSample, InputError> {
        match self {
            BoardInput::Console(input) => input.read(),
            BoardInput::Joystick(input) => input.read(),
        }
    }
}
