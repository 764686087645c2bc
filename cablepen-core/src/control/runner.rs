//! The control loop
//!
//! One iteration, in order:
//! 1. Read a sample (substituting the mode default on error)
//! 2. Compute and dispatch the next position with the current pen state
//! 3. Poll the toggle button; on a press, flip the pen and re-dispatch
//! 4. Check the stop condition
//! 5. Wait the loop interval, unless stopping
//!
//! Reads, the debounce wait and the interval wait may all block. The loop
//! never terminates on its own; it stops on a stop request or an actuator
//! fault, and every exit path releases the sink once.

use embedded_hal::delay::DelayNs;

use super::guard::SinkGuard;
use super::pipeline::Pipeline;
use crate::config::{ConfigError, PlotterConfig};
use crate::input::{ControlSample, InputError, InputMode, ToggleDebouncer};
use crate::motion::{Displacement, Position};
use crate::state::{Event, LoopState, PenState, StopReason};
use crate::traits::{
    ActuatorCommand, ActuatorError, ActuatorSink, ButtonInput, InputSource, StopCondition,
};

/// Record of one completed iteration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Sample fed to the pipeline (possibly the substitute)
    pub sample: ControlSample,
    /// Why the reading was replaced, if it was
    pub fallback: Option<InputError>,
    /// Clamped target before smoothing
    pub target: Position,
    /// Commanded position
    pub position: Position,
    /// Move since the previous iteration
    pub displacement: Displacement,
    /// New pen state, if the toggle button was pressed
    pub toggled: Option<PenState>,
    /// The stop condition fired at the end of this iteration
    pub stop_requested: bool,
}

/// Final report once the sink has been released
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Shutdown {
    pub reason: StopReason,
    /// Completed iterations
    pub iterations: u32,
    /// Last position the actuators accepted
    pub position: Position,
    /// Last pen state the actuators accepted
    pub pen: PenState,
    /// Result of releasing the actuator sink
    pub release: Result<(), ActuatorError>,
}

/// Control loop over its capabilities
///
/// - `I`: control sample source
/// - `A`: actuator sink
/// - `B`: pen toggle button
/// - `S`: stop condition
/// - `D`: delay used for debouncing and the loop interval
pub struct ControlLoop<I, A: ActuatorSink, B, S, D> {
    pipeline: Pipeline,
    mode: InputMode,
    input: I,
    sink: SinkGuard<A>,
    toggle: B,
    debouncer: ToggleDebouncer,
    stop: S,
    delay: D,
    loop_interval_ms: u32,
    position: Position,
    pen: PenState,
    state: LoopState,
    iterations: u32,
}

impl<I, A, B, S, D> ControlLoop<I, A, B, S, D>
where
    I: InputSource,
    A: ActuatorSink,
    B: ButtonInput,
    S: StopCondition,
    D: DelayNs,
{
    /// Validate the configuration and take ownership of the capabilities
    ///
    /// The pen starts up at the workspace center. On error the sink is
    /// released before returning.
    pub fn new(
        config: &PlotterConfig,
        input: I,
        sink: A,
        toggle: B,
        stop: S,
        delay: D,
    ) -> Result<Self, ConfigError> {
        let sink = SinkGuard::new(sink);
        let pipeline = Pipeline::from_config(config)?;
        if input.mode() != config.input.mode {
            return Err(ConfigError::InputModeMismatch);
        }

        Ok(Self {
            pipeline,
            mode: config.input.mode,
            input,
            sink,
            toggle,
            debouncer: ToggleDebouncer::new(config.timing.debounce_poll_ms),
            stop,
            delay,
            loop_interval_ms: config.timing.loop_interval_ms,
            position: pipeline.home(),
            pen: PenState::Up,
            state: LoopState::Running,
            iterations: 0,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Borrow the actuator sink
    pub fn sink(&self) -> &A {
        self.sink.sink()
    }

    /// Command the start position with the pen up
    pub fn park(&mut self) -> Result<(), ActuatorError> {
        self.dispatch(self.position, self.pen)
    }

    /// Run one iteration
    ///
    /// Returns `Err` if the sink rejected a command; the loop is then
    /// stopped with that fault. A loop that has already stopped returns
    /// `Err(ActuatorError::Released)` without touching any capability.
    pub fn step(&mut self) -> Result<Iteration, ActuatorError> {
        if !self.state.is_running() {
            return Err(ActuatorError::Released);
        }

        let (sample, fallback) = self.acquire();
        let target = self.pipeline.target(self.position, sample);
        let next = self.pipeline.smooth(self.position, target);

        self.dispatch(next, self.pen)?;
        let displacement = self.position.displacement_to(next);
        self.position = next;

        let toggled = match self.debouncer.poll(&mut self.toggle, &mut self.delay) {
            Some(_) => {
                let pen = self.pen.toggled();
                self.dispatch(self.position, pen)?;
                self.pen = pen;
                Some(pen)
            }
            None => None,
        };

        let stop_requested = self.stop.stop_requested();
        if stop_requested {
            self.state = self.state.transition(Event::StopRequested);
        } else {
            self.delay.delay_ms(self.loop_interval_ms);
        }

        self.iterations = self.iterations.wrapping_add(1);

        Ok(Iteration {
            sample,
            fallback,
            target,
            position: next,
            displacement,
            toggled,
            stop_requested,
        })
    }

    /// Park, iterate until stopped, then shut down
    ///
    /// `observe` sees every completed iteration.
    pub fn run<F>(mut self, mut observe: F) -> Shutdown
    where
        F: FnMut(&Iteration),
    {
        if self.park().is_ok() {
            while self.state.is_running() {
                match self.step() {
                    Ok(iteration) => observe(&iteration),
                    Err(_) => break,
                }
            }
        }
        self.shutdown()
    }

    /// Stop (if still running) and release the sink
    pub fn shutdown(mut self) -> Shutdown {
        self.state = self.state.transition(Event::StopRequested);
        let release = self.sink.release();

        Shutdown {
            reason: self.state.stop_reason().unwrap_or(StopReason::Requested),
            iterations: self.iterations,
            position: self.position,
            pen: self.pen,
            release,
        }
    }

    fn acquire(&mut self) -> (ControlSample, Option<InputError>) {
        match self.input.read() {
            Ok(sample) if sample.mode() == self.mode => (sample, None),
            Ok(_) => (
                self.pipeline.fallback(self.mode),
                Some(InputError::ModeMismatch),
            ),
            Err(e) => (self.pipeline.fallback(self.mode), Some(e)),
        }
    }

    fn dispatch(&mut self, position: Position, pen: PenState) -> Result<(), ActuatorError> {
        let command = ActuatorCommand::new(position, pen);
        if let Err(e) = self.sink.apply(command) {
            self.state = self.state.transition(Event::ActuatorFault(e));
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CancelToken, NeverStop, StopButton};
    use crate::testing::{CountingDelay, RecordingSink, ScriptedButton, ScriptedInput};

    fn home() -> Position {
        Position::new(120.0, 127.5)
    }

    fn stop_after(iterations: usize) -> StopButton<ScriptedButton> {
        let mut levels = vec![false; iterations - 1];
        levels.push(true);
        StopButton::new(ScriptedButton::new(&levels))
    }

    fn close(a: Position, b: Position) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_single_signal_iteration() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut delay = CountingDelay::default();

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(1),
            &mut delay,
        )
        .unwrap();
        let shutdown = control.run(|_| {});

        assert_eq!(shutdown.reason, StopReason::Requested);
        assert_eq!(shutdown.iterations, 1);
        assert_eq!(shutdown.position, Position::new(125.0, 127.5));
        assert_eq!(shutdown.pen, PenState::Up);
        assert_eq!(shutdown.release, Ok(()));

        assert_eq!(
            sink.commands,
            vec![
                ActuatorCommand::new(home(), PenState::Up),
                ActuatorCommand::new(Position::new(125.0, 127.5), PenState::Up),
            ]
        );
        assert_eq!(sink.releases, 1);
        // stopping skips the interval wait
        assert!(delay.ms_calls.is_empty());
    }

    #[test]
    fn test_interval_between_iterations() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut delay = CountingDelay::default();

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000, 1000, 1000]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(3),
            &mut delay,
        )
        .unwrap();
        let shutdown = control.run(|_| {});

        assert_eq!(shutdown.iterations, 3);
        assert_eq!(shutdown.position, Position::new(135.0, 127.5));
        assert_eq!(delay.ms_calls, vec![20, 20]);
    }

    #[test]
    fn test_signal_max_matches_min() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[2000]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(1),
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|_| {});

        assert!(close(shutdown.position, Position::new(125.0, 127.5)));
    }

    #[test]
    fn test_out_of_range_signal_is_saturated() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut records = Vec::new();

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[3000]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(1),
            CountingDelay::default(),
        )
        .unwrap();
        control.run(|it| records.push(*it));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fallback, None);
        assert!(close(records[0].position, Position::new(125.0, 127.5)));
    }

    #[test]
    fn test_oversized_console_signal_is_saturated() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut records = Vec::new();

        let control = ControlLoop::new(
            &config,
            ScriptedInput::lines(InputMode::Signal, &["99999999999", "-99999999999"]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(2),
            CountingDelay::default(),
        )
        .unwrap();
        control.run(|it| records.push(*it));

        assert_eq!(records[0].fallback, None);
        assert_eq!(records[0].sample, ControlSample::Signal(i32::MAX));
        assert!(close(records[0].position, Position::new(125.0, 127.5)));
        // the low end maps to 0°, east again
        assert_eq!(records[1].fallback, None);
        assert!(close(records[1].position, Position::new(130.0, 127.5)));
    }

    #[test]
    fn test_malformed_reading_uses_default() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut records = Vec::new();

        let input = ScriptedInput::new(
            InputMode::Signal,
            &[
                Err(InputError::Malformed),
                Ok(ControlSample::Target(Position::new(50.0, 50.0))),
            ],
        );
        let control = ControlLoop::new(
            &config,
            input,
            &mut sink,
            ScriptedButton::released(),
            stop_after(2),
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|it| records.push(*it));

        assert_eq!(shutdown.iterations, 2);
        assert_eq!(records[0].fallback, Some(InputError::Malformed));
        assert_eq!(records[0].sample, ControlSample::Signal(1500));
        // midpoint maps to 180°: one step west
        assert!(close(records[0].position, Position::new(115.0, 127.5)));
        assert_eq!(records[1].fallback, Some(InputError::ModeMismatch));
        assert_eq!(records[1].sample, ControlSample::Signal(1500));
    }

    #[test]
    fn test_target_mode_rate_limited() {
        let mut config = PlotterConfig::default();
        config.input.mode = InputMode::Target;
        let mut sink = RecordingSink::default();
        let mut records = Vec::new();

        let input = ScriptedInput::new(
            InputMode::Target,
            &[
                Ok(ControlSample::Target(Position::new(40.0, 40.0))),
                Err(InputError::Unavailable),
            ],
        );
        let control = ControlLoop::new(
            &config,
            input,
            &mut sink,
            ScriptedButton::released(),
            stop_after(2),
            CountingDelay::default(),
        )
        .unwrap();
        control.run(|it| records.push(*it));

        assert_eq!(records[0].target, Position::new(40.0, 40.0));
        assert_eq!(records[0].position, Position::new(113.0, 120.5));
        assert_eq!(
            records[0].displacement,
            Displacement { dx: -7.0, dy: -7.0 }
        );
        // field center is the default target
        assert_eq!(records[1].fallback, Some(InputError::Unavailable));
        assert_eq!(records[1].target, home());
        assert_eq!(records[1].position, home());
    }

    #[test]
    fn test_toggle_flips_once_per_press() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut delay = CountingDelay::default();
        let mut records = Vec::new();

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000, 1000, 1000]),
            &mut sink,
            ScriptedButton::new(&[false, true, true, true, false]),
            stop_after(3),
            &mut delay,
        )
        .unwrap();
        let shutdown = control.run(|it| records.push(*it));

        assert_eq!(shutdown.pen, PenState::Down);
        let toggles: Vec<_> = records.iter().map(|it| it.toggled).collect();
        assert_eq!(toggles, vec![None, Some(PenState::Down), None]);

        // park, three positions, one re-dispatch after the flip
        assert_eq!(sink.commands.len(), 5);
        assert_eq!(sink.commands[2].pen, PenState::Up);
        assert_eq!(sink.commands[3].pen, PenState::Down);
        assert_eq!(sink.commands[3].position, sink.commands[2].position);
        assert_eq!(sink.commands[4].pen, PenState::Down);

        // held for three polls, then the loop interval
        assert_eq!(delay.ms_calls, vec![20, 10, 10, 10, 20]);
    }

    #[test]
    fn test_rejected_toggle_keeps_pen_state() {
        let config = PlotterConfig::default();
        // park and the first position are accepted, the pen re-dispatch is not
        let mut sink = RecordingSink::failing_from(2);

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000; 4]),
            &mut sink,
            ScriptedButton::new(&[true, false]),
            NeverStop,
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|_| {});

        assert_eq!(
            shutdown.reason,
            StopReason::ActuatorFault(ActuatorError::Pwm)
        );
        assert_eq!(shutdown.pen, PenState::Up);
        assert_eq!(shutdown.position, Position::new(125.0, 127.5));
        assert_eq!(sink.commands.len(), 2);
        assert!(sink.commands.iter().all(|c| c.pen == PenState::Up));
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn test_actuator_fault_stops_and_releases() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::failing_from(2);

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000; 10]),
            &mut sink,
            ScriptedButton::released(),
            NeverStop,
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|_| {});

        assert_eq!(
            shutdown.reason,
            StopReason::ActuatorFault(ActuatorError::Pwm)
        );
        assert_eq!(shutdown.iterations, 1);
        assert_eq!(shutdown.position, Position::new(125.0, 127.5));
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn test_park_fault() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::failing_from(0);

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000]),
            &mut sink,
            ScriptedButton::released(),
            NeverStop,
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|_| panic!("no iteration after a park fault"));

        assert_eq!(shutdown.iterations, 0);
        assert_eq!(
            shutdown.reason,
            StopReason::ActuatorFault(ActuatorError::Pwm)
        );
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn test_cancel_token_stops_at_boundary() {
        let config = PlotterConfig::default();
        let token = CancelToken::new();
        let mut sink = RecordingSink::default();
        let mut seen = 0;

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000; 10]),
            &mut sink,
            ScriptedButton::released(),
            &token,
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|_| {
            seen += 1;
            if seen == 2 {
                token.cancel();
            }
        });

        assert_eq!(shutdown.iterations, 3);
        assert_eq!(shutdown.reason, StopReason::Requested);
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn test_step_after_stop_is_refused() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        {
            let mut control = ControlLoop::new(
                &config,
                ScriptedInput::signals(&[1000, 1000]),
                &mut sink,
                ScriptedButton::released(),
                stop_after(1),
                CountingDelay::default(),
            )
            .unwrap();

            let iteration = control.step().unwrap();
            assert!(iteration.stop_requested);
            assert_eq!(control.state(), LoopState::Stopped(StopReason::Requested));
            assert_eq!(control.step(), Err(ActuatorError::Released));
            assert_eq!(control.iterations(), 1);
        }
        // dropped without shutdown: still released once
        assert_eq!(sink.commands.len(), 1);
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn test_release_error_reported() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink {
            release_error: Some(ActuatorError::Rejected),
            ..Default::default()
        };

        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(1),
            CountingDelay::default(),
        )
        .unwrap();
        let shutdown = control.run(|_| {});

        assert_eq!(shutdown.release, Err(ActuatorError::Rejected));
        assert_eq!(sink.releases, 1);
    }

    #[test]
    fn test_invalid_config_releases_sink() {
        let mut config = PlotterConfig::default();
        config.motion.step_size = 0.0;
        let mut sink = RecordingSink::default();

        let result = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[]),
            &mut sink,
            ScriptedButton::released(),
            NeverStop,
            CountingDelay::default(),
        );

        assert_eq!(result.err(), Some(ConfigError::NonPositiveStepSize));
        assert_eq!(sink.releases, 1);
        assert!(sink.commands.is_empty());
    }

    #[test]
    fn test_input_mode_mismatch_rejected() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();

        let result = ControlLoop::new(
            &config,
            ScriptedInput::new(InputMode::Target, &[]),
            &mut sink,
            ScriptedButton::released(),
            NeverStop,
            CountingDelay::default(),
        );

        assert_eq!(result.err(), Some(ConfigError::InputModeMismatch));
    }

    #[test]
    fn test_position_stays_in_workspace() {
        let config = PlotterConfig::default();
        let mut sink = RecordingSink::default();
        let mut records = Vec::new();

        // 80 mm to the east wall, so the later steps are clamped
        let control = ControlLoop::new(
            &config,
            ScriptedInput::signals(&[1000; 40]),
            &mut sink,
            ScriptedButton::released(),
            stop_after(40),
            CountingDelay::default(),
        )
        .unwrap();
        control.run(|it| records.push(*it));

        assert_eq!(records.len(), 40);
        assert!(records
            .iter()
            .all(|it| config.workspace.contains(it.position)));
        assert_eq!(records[39].position, Position::new(200.0, 127.5));
    }
}
