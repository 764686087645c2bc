//! Build script for cablepen-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates plotter.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use cablepen_core::config::{parse_config, PlotterConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate plotter.toml at compile time
///
/// The file is checked twice: by the `toml` crate against the full schema
/// (catching unknown keys and wrong types), and by the firmware's own
/// parser, which must agree with it.
fn validate_config() {
    println!("cargo:rerun-if-changed=plotter.toml");

    let config_path = Path::new("plotter.toml");

    if !config_path.exists() {
        fail(
            "plotter.toml not found!",
            &["The firmware embeds plotter.toml from the cablepen-firmware directory."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read plotter.toml", &[format!("Error: {}", e)]),
    };

    // Full schema check
    let schema: PlotterConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_owned).collect();
            fail("Invalid plotter.toml", &lines);
        }
    };

    if let Err(e) = schema.validate() {
        fail(
            "Invalid plotter configuration",
            &[format!("validate() rejected the file: {:?}", e)],
        );
    }

    // The on-target parser must read the same values
    match parse_config(&content) {
        Ok(parsed) if parsed == schema => {}
        Ok(_) => fail(
            "plotter.toml parses differently on the target",
            &["Use plain `key = value` lines; arrays and inline tables are not supported."],
        ),
        Err(e) => fail(
            "plotter.toml is not readable by the firmware parser",
            &[format!("{:?}", e)],
        ),
    }
}

/// Abort the build with a boxed message
fn fail<S: AsRef<str>>(title: &str, details: &[S]) -> ! {
    let details = details
        .iter()
        .map(|line| format!("║  {:<64} ║", line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<58} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, details
    );
}
