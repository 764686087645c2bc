//! Stop conditions
//!
//! Checked once per iteration, after the toggle button. A blocked input read
//! or debounce wait cannot be interrupted; the stop is seen at the next
//! boundary.

use core::sync::atomic::{AtomicBool, Ordering};

use super::debounce::ToggleDebouncer;
use crate::traits::{ButtonInput, StopCondition};

/// Secondary push button that stops the loop on its press edge
///
/// Non-blocking: the button is sampled once per check and a held button
/// does not delay shutdown.
pub struct StopButton<B> {
    button: B,
    edge: ToggleDebouncer,
}

impl<B: ButtonInput> StopButton<B> {
    /// Wrap a button
    pub fn new(button: B) -> Self {
        Self {
            button,
            edge: ToggleDebouncer::new(0),
        }
    }

    /// Release the wrapped button
    pub fn into_inner(self) -> B {
        self.button
    }
}

impl<B: ButtonInput> StopCondition for StopButton<B> {
    fn stop_requested(&mut self) -> bool {
        self.edge.update(self.button.is_pressed()).is_some()
    }
}

/// External cancellation flag
///
/// Can live in a `static` and be set from another context (interrupt,
/// other task). Uses plain loads and stores only.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create an unset token
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl StopCondition for &CancelToken {
    fn stop_requested(&mut self) -> bool {
        self.is_cancelled()
    }
}

/// Stop condition that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl StopCondition for NeverStop {
    fn stop_requested(&mut self) -> bool {
        false
    }
}

/// Either condition stops the loop; both are always sampled
impl<A: StopCondition, B: StopCondition> StopCondition for (A, B) {
    fn stop_requested(&mut self) -> bool {
        let first = self.0.stop_requested();
        let second = self.1.stop_requested();
        first || second
    }
}
