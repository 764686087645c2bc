//! Embedded configuration loader
//!
//! Parses and validates the config compiled into the image. build.rs has
//! already run the same checks, so a failure here means the image was
//! built from a different file than the one validated.

use defmt::*;

use cablepen_core::config::{parse_config, ConfigError, ParseError, PlotterConfig};

/// Embedded configuration (compiled into firmware)
/// Edit plotter.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../plotter.toml");

/// Configuration loading errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Config text could not be parsed
    Parse(ParseError),
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Parse and validate the embedded configuration
pub fn load_embedded() -> Result<PlotterConfig, LoadError> {
    debug!("Parsing {} bytes of embedded config", EMBEDDED_CONFIG.len());
    let config = parse_config(EMBEDDED_CONFIG)?;
    config.validate()?;
    log_config_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &PlotterConfig) {
    info!("Configuration loaded successfully");
    let ws = &config.workspace;
    debug!(
        "  workspace x={}..{} y={}..{} mm",
        ws.x_min, ws.x_max, ws.y_min, ws.y_max
    );
    debug!(
        "  input {:?} from {:?}, signal {}..{}",
        config.input.mode, config.input.source, config.input.signal_min, config.input.signal_max
    );
    debug!(
        "  step {} mm, smoothing {} / {} mm",
        config.motion.step_size, config.motion.smooth_threshold, config.motion.smooth_step
    );
    debug!(
        "  loop {} ms, debounce poll {} ms",
        config.timing.loop_interval_ms, config.timing.debounce_poll_ms
    );
    debug!(
        "  pen up {}°, down {}°, sink {:?}",
        config.pen.up_angle, config.pen.down_angle, config.actuator.sink
    );
}
