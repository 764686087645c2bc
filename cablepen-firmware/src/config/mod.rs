//! Configuration loading
//!
//! The configuration is embedded at build time (plotter.toml) and parsed
//! with the core's no_std parser at boot.

pub mod loader;

pub use loader::{load_embedded, LoadError};
