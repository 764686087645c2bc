//! Minimal TOML reader for the plotter config file
//!
//! Handles only the subset the config file uses. No allocation.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! Unknown keys are skipped; the build script checks the embedded file
//! against the full schema.

use super::types::{InputSourceKind, PlotterConfig, SinkKind};
use crate::input::InputMode;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection {
        /// 1-based line number
        line: usize,
    },
    /// Value does not parse as the key's type
    InvalidValue {
        /// 1-based line number
        line: usize,
    },
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Workspace,
    Field,
    Input,
    Motion,
    Timing,
    Pen,
    Actuator,
}

/// Parse config text, starting from the defaults
pub fn parse_config(input: &str) -> Result<PlotterConfig, ParseError> {
    let mut config = PlotterConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection { line: line_no });
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)
                .map_err(|_| ParseError::InvalidValue { line: line_no })?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "workspace" => Some(Section::Workspace),
        "field" => Some(Section::Field),
        "input" => Some(Section::Input),
        "motion" => Some(Section::Motion),
        "timing" => Some(Section::Timing),
        "pen" => Some(Section::Pen),
        "actuator" => Some(Section::Actuator),
        _ => None,
    }
}

/// Drop a trailing comment, unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Marker for a value that failed to parse
struct BadValue;

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PlotterConfig,
) -> Result<(), BadValue> {
    match section {
        Section::Root => {}
        Section::Workspace => {
            let ws = &mut config.workspace;
            match key {
                "x_min" => ws.x_min = parse_float(value)?,
                "x_max" => ws.x_max = parse_float(value)?,
                "y_min" => ws.y_min = parse_float(value)?,
                "y_max" => ws.y_max = parse_float(value)?,
                _ => {}
            }
        }
        Section::Field => match key {
            "width" => config.field.width = parse_float(value)?,
            "height" => config.field.height = parse_float(value)?,
            _ => {}
        },
        Section::Input => {
            let input = &mut config.input;
            match key {
                "mode" => {
                    input.mode = match parse_string(value) {
                        "signal" => InputMode::Signal,
                        "target" => InputMode::Target,
                        _ => return Err(BadValue),
                    }
                }
                "source" => {
                    input.source = match parse_string(value) {
                        "console" => InputSourceKind::Console,
                        "joystick" => InputSourceKind::Joystick,
                        _ => return Err(BadValue),
                    }
                }
                "signal_min" => input.signal_min = parse_int(value)?,
                "signal_max" => input.signal_max = parse_int(value)?,
                "angle_min" => input.angle_min = parse_float(value)?,
                "angle_max" => input.angle_max = parse_float(value)?,
                _ => {}
            }
        }
        Section::Motion => {
            let motion = &mut config.motion;
            match key {
                "step_size" => motion.step_size = parse_float(value)?,
                "smooth_threshold" => motion.smooth_threshold = parse_float(value)?,
                "smooth_step" => motion.smooth_step = parse_float(value)?,
                _ => {}
            }
        }
        Section::Timing => match key {
            "loop_interval_ms" => config.timing.loop_interval_ms = parse_int(value)?,
            "debounce_poll_ms" => config.timing.debounce_poll_ms = parse_int(value)?,
            _ => {}
        },
        Section::Pen => match key {
            "up_angle" => config.pen.up_angle = parse_float(value)?,
            "down_angle" => config.pen.down_angle = parse_float(value)?,
            _ => {}
        },
        Section::Actuator => {
            let actuator = &mut config.actuator;
            match key {
                "sink" => {
                    actuator.sink = match parse_string(value) {
                        "hardware" => SinkKind::Hardware,
                        "simulated" => SinkKind::Simulated,
                        _ => return Err(BadValue),
                    }
                }
                "duty_min" => actuator.duty_min = parse_int(value)?,
                "duty_max" => actuator.duty_max = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, BadValue> {
    value.parse().map_err(|_| BadValue)
}

fn parse_float(value: &str) -> Result<f64, BadValue> {
    value.parse().map_err(|_| BadValue)
}
