//! Input drivers
//!
//! - [`PinButton`]: GPIO push button
//! - [`ConsoleInput`]: line-oriented samples over a byte stream
//! - [`AnalogJoystick`]: joystick on ADC channels

mod button;
mod console;
mod joystick;

pub use button::PinButton;
pub use console::ConsoleInput;
pub use joystick::{AnalogJoystick, AnalogSource, JoystickAxis, ADC_FULL_SCALE};
