//! Operator input handling
//!
//! - Control samples and their text form
//! - Toggle debouncing for the pen button
//! - Stop conditions checked at iteration boundaries

pub mod debounce;
pub mod sample;
pub mod stop;

pub use debounce::{ButtonState, ToggleDebouncer, ToggleEvent};
pub use sample::{parse_sample, parse_signal, parse_target, ControlSample, InputError, InputMode};
pub use stop::{CancelToken, NeverStop, StopButton};
