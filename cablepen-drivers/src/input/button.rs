//! GPIO push button

use embedded_hal::digital::InputPin;

use cablepen_core::traits::ButtonInput;

/// Push button on a digital input
///
/// Active-high by default (button to 3V3 with a pull-down). A pin read
/// error reads as released.
pub struct PinButton<P> {
    pin: P,
    /// If true, pressed = pin LOW
    inverted: bool,
}

impl<P: InputPin> PinButton<P> {
    /// Create a button
    ///
    /// # Arguments
    /// - `pin`: The GPIO input
    /// - `inverted`: If true, the button is pressed when the pin reads LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    pub fn active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: InputPin> ButtonInput for PinButton<P> {
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.inverted,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock GPIO input for testing
    struct MockPin {
        level: Option<bool>,
    }

    #[derive(Debug)]
    struct MockPinError;

    impl embedded_hal::digital::Error for MockPinError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPin {
        type Error = MockPinError;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.level.ok_or(MockPinError)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.level.map(|high| !high).ok_or(MockPinError)
        }
    }

    #[test]
    fn test_active_high() {
        let mut button = PinButton::active_high(MockPin { level: Some(true) });
        assert!(button.is_pressed());
        button.pin.level = Some(false);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_active_low() {
        let mut button = PinButton::active_low(MockPin { level: Some(false) });
        assert!(button.is_pressed());
        button.pin.level = Some(true);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_read_error_is_released() {
        let mut button = PinButton::active_high(MockPin { level: None });
        assert!(!button.is_pressed());
        let mut button = PinButton::active_low(MockPin { level: None });
        assert!(!button.is_pressed());
    }
}
