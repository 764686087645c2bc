//! Cablepen - Cable-Suspended Pen Plotter Firmware
//!
//! Main firmware binary for RP2040-based cable plotters. Reads operator
//! input (console or joystick), runs the control loop, and drives the two
//! cable motors and the pen-lift servo over PWM.
//!
//! Board wiring:
//! - GP0 / GP1: X / Y cable PWM (slice 0 A/B, 50 Hz)
//! - GP2: pen-lift servo PWM (slice 1 A, 50 Hz)
//! - GP22: pen toggle button (active high)
//! - GP21: stop button (active high)
//! - GP26 / GP27: joystick X / Y (ADC)
//! - GP17: console RX (UART0)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Config as UartConfig, UartRx};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use cablepen_core::config::{InputSourceKind, SinkKind};
use cablepen_core::control::{ControlLoop, Iteration, Shutdown};
use cablepen_core::input::StopButton;
use cablepen_core::state::StopReason;
use cablepen_drivers::duty::DutyPlan;
use cablepen_drivers::input::{AnalogJoystick, ConsoleInput, PinButton};
use cablepen_drivers::sink::{PwmSink, SimulatedSink};

use crate::input::{AdcSticks, BoardInput, UartReader};
use crate::sink::BoardSink;

mod config;
mod input;
mod sink;

/// Cable and servo PWM frequency
const PWM_FREQ_HZ: u32 = 50;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Cablepen firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Invalid configuration is fatal: nothing moves
    let config = match config::load_embedded() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration rejected: {:?}", e);
            error!("Halting before any motion");
            halt().await
        }
    };

    let plan = DutyPlan::from_config(&config);
    let sink = match config.actuator.sink {
        SinkKind::Hardware => {
            let pwm_config = plotter_pwm_config();
            let cables = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_0, p.PIN_1, pwm_config.clone());
            let servo = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_config);

            let (Some(x), Some(y)) = cables.split() else {
                error!("Cable PWM outputs unavailable");
                halt().await
            };
            let (Some(pen), _) = servo.split() else {
                error!("Servo PWM output unavailable");
                halt().await
            };

            info!("PWM outputs initialized at {} Hz", PWM_FREQ_HZ);
            BoardSink::Hardware(PwmSink::new(x, y, pen, plan))
        }
        SinkKind::Simulated => {
            warn!("Simulated sink selected, actuators will not move");
            BoardSink::Simulated(SimulatedSink::new(plan))
        }
    };

    let input = match config.input.source {
        InputSourceKind::Console => {
            let rx = UartRx::new_blocking(p.UART0, p.PIN_17, UartConfig::default());
            info!("Console input on UART0 ({:?} mode)", config.input.mode);
            BoardInput::Console(ConsoleInput::new(UartReader::new(rx), config.input.mode))
        }
        InputSourceKind::Joystick => {
            let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
            let x = Channel::new_pin(p.PIN_26, Pull::None);
            let y = Channel::new_pin(p.PIN_27, Pull::None);
            info!("Joystick input on ADC0/ADC1 ({:?} mode)", config.input.mode);
            BoardInput::Joystick(AnalogJoystick::new(
                AdcSticks::new(adc, x, y),
                config.input.mode,
                config.input.signal_range(),
                config.field,
            ))
        }
    };

    let toggle = PinButton::active_high(Input::new(p.PIN_22, Pull::Down));
    let stop = StopButton::new(PinButton::active_high(Input::new(p.PIN_21, Pull::Down)));
    info!("Buttons initialized");

    let control = match ControlLoop::new(&config, input, sink, toggle, stop, Delay) {
        Ok(control) => control,
        Err(e) => {
            error!("Control loop rejected configuration: {:?}", e);
            halt().await
        }
    };

    info!(
        "Control loop running, pen parked at ({}, {})",
        control.position().x,
        control.position().y
    );

    // Blocks until the stop button or an actuator fault
    let shutdown = control.run(log_iteration);
    log_shutdown(&shutdown);

    halt().await
}

/// PWM configuration for 50 Hz on both slices
fn plotter_pwm_config() -> PwmConfig {
    let clk_hz = embassy_rp::clocks::clk_sys_freq();
    // Smallest integer divider that keeps the period within a 16-bit top
    let divider = (clk_hz / PWM_FREQ_HZ / 65_535 + 1) as u8;
    let top = (clk_hz / (PWM_FREQ_HZ * divider as u32)) as u16 - 1;

    let mut config = PwmConfig::default();
    config.divider = divider.into();
    config.top = top;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Observer for each completed iteration
fn log_iteration(iteration: &Iteration) {
    if let Some(reason) = iteration.fallback {
        warn!(
            "Input unusable ({:?}), substituted {:?}",
            reason, iteration.sample
        );
    }

    trace!(
        "pos=({}, {}) d=({}, {})",
        iteration.position.x,
        iteration.position.y,
        iteration.displacement.dx,
        iteration.displacement.dy
    );

    if let Some(pen) = iteration.toggled {
        info!("Pen {:?}", pen);
    }

    if iteration.stop_requested {
        info!("Stop requested");
    }
}

fn log_shutdown(shutdown: &Shutdown) {
    match shutdown.reason {
        StopReason::Requested => info!("Stopped after {} iterations", shutdown.iterations),
        StopReason::ActuatorFault(e) => error!(
            "Actuator fault {:?} after {} iterations",
            e, shutdown.iterations
        ),
    }

    info!(
        "Final state: ({}, {}) pen {:?}",
        shutdown.position.x, shutdown.position.y, shutdown.pen
    );

    match shutdown.release {
        Ok(()) => info!("Actuators released"),
        Err(e) => error!("Actuator release failed: {:?}", e),
    }
}

/// Park the core forever
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
        trace!("Halted");
    }
}
