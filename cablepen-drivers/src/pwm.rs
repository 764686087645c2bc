//! PWM output channel
//!
//! Wraps an `embedded_hal` PWM channel and writes 16-bit-scale duties,
//! rescaled to the channel's own maximum.

use embedded_hal::pwm::SetDutyCycle;

use crate::duty::DUTY_SCALE;
use cablepen_core::traits::ActuatorError;

/// One PWM output driven with 16-bit-scale duties
pub struct PwmChannel<P> {
    pwm: P,
    last_duty: Option<u16>,
}

impl<P: SetDutyCycle> PwmChannel<P> {
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            last_duty: None,
        }
    }

    /// Write a duty on the `0..=65535` scale
    pub fn write(&mut self, duty: u16) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fraction(duty, DUTY_SCALE)
            .map_err(|_| ActuatorError::Pwm)?;
        self.last_duty = Some(duty);
        Ok(())
    }

    /// Drive the output low
    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::Pwm)?;
        self.last_duty = Some(0);
        Ok(())
    }

    /// Last duty written, if any
    pub fn last_duty(&self) -> Option<u16> {
        self.last_duty
    }

    /// Release the underlying channel
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

    /// PWM channel with a configurable top value
    pub struct MockPwm {
        pub max: u16,
        pub duty: u16,
        pub fail: bool,
    }

    impl MockPwm {
        pub fn new(max: u16) -> Self {
            Self {
                max,
                duty: 0,
                fail: false,
            }
        }
    }

    #[derive(Debug)]
    pub struct MockPwmError;

    impl embedded_hal::pwm::Error for MockPwmError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPwm {
        type Error = MockPwmError;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockPwmError);
            }
            self.duty = duty;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockPwm;
    use super::*;

    #[test]
    fn test_full_scale_channel() {
        let mut channel = PwmChannel::new(MockPwm::new(u16::MAX));
        channel.write(1638).unwrap();
        assert_eq!(channel.last_duty(), Some(1638));
        assert_eq!(channel.into_inner().duty, 1638);
    }

    #[test]
    fn test_rescaled_to_channel_top() {
        // 50 Hz slice with top = 62499
        let mut channel = PwmChannel::new(MockPwm::new(62_499));
        channel.write(DUTY_SCALE).unwrap();
        assert_eq!(channel.last_duty(), Some(DUTY_SCALE));
        assert_eq!(channel.into_inner().duty, 62_499);
    }

    #[test]
    fn test_off() {
        let mut channel = PwmChannel::new(MockPwm::new(1000));
        channel.write(8192).unwrap();
        channel.off().unwrap();
        assert_eq!(channel.last_duty(), Some(0));
        assert_eq!(channel.into_inner().duty, 0);
    }

    #[test]
    fn test_error_maps_to_pwm() {
        let mut pwm = MockPwm::new(1000);
        pwm.fail = true;
        let mut channel = PwmChannel::new(pwm);
        assert_eq!(channel.write(100), Err(ActuatorError::Pwm));
        assert_eq!(channel.last_duty(), None);
    }
}
