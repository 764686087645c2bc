//! Toggle button debouncing
//!
//! A two-state machine over raw button levels. The RELEASED → PRESSED
//! transition fires exactly one [`ToggleEvent`]; nothing fires on release,
//! so a press yields one event however long it is held.
//!
//! [`ToggleDebouncer::poll`] blocks after a press, polling at a fixed
//! interval until the button reads released again. There is no timeout: a
//! stuck-high input blocks the caller indefinitely.

use embedded_hal::delay::DelayNs;

use crate::traits::ButtonInput;

/// Debounced button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

/// One confirmed physical press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleEvent {
    /// Number of presses seen so far, including this one
    pub count: u32,
}

/// Press-edge state machine with a blocking release wait
#[derive(Debug, Clone)]
pub struct ToggleDebouncer {
    state: ButtonState,
    poll_interval_ms: u32,
    presses: u32,
}

impl ToggleDebouncer {
    /// Create a debouncer polling at `poll_interval_ms` while held
    pub fn new(poll_interval_ms: u32) -> Self {
        Self {
            state: ButtonState::Released,
            poll_interval_ms,
            presses: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Number of confirmed presses
    pub fn presses(&self) -> u32 {
        self.presses
    }

    /// Feed one raw sample; returns an event on the press edge only
    pub fn update(&mut self, pressed: bool) -> Option<ToggleEvent> {
        match (self.state, pressed) {
            (ButtonState::Released, true) => {
                self.state = ButtonState::Pressed;
                self.presses = self.presses.wrapping_add(1);
                Some(ToggleEvent {
                    count: self.presses,
                })
            }
            (ButtonState::Pressed, false) => {
                self.state = ButtonState::Released;
                None
            }
            _ => None,
        }
    }

    /// Sample the button once; on a press, wait for release
    ///
    /// Returns the press event after the button has been released.
    pub fn poll<B, D>(&mut self, button: &mut B, delay: &mut D) -> Option<ToggleEvent>
    where
        B: ButtonInput + ?Sized,
        D: DelayNs + ?Sized,
    {
        let event = self.update(button.is_pressed())?;

        while self.state == ButtonState::Pressed {
            delay.delay_ms(self.poll_interval_ms);
            self.update(button.is_pressed());
        }

        Some(event)
    }
}
