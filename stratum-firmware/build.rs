//! Build script for stratum-firmware
//!
//! - Sets up linker search paths for memory.x and the linker scripts
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Printable range covered by the built-in font
const FONT_RANGE: std::ops::RangeInclusive<char> = ' '..='\x7f';

/// Longest splash line (12 seven-column cells fill the 84-pixel row)
const MAX_SPLASH_LEN: usize = 12;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a display.toml configuration file.          ║\n\
            ║  Please create one in the stratum-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_splash(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid display configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [display] and [splash] are understood by the on-device parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if name != "display" && name != "splash" {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_int(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(n)) => {
            if *n < min || *n > max {
                errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            }
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Validate panel bring-up parameters
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };

    for key in display.keys() {
        if ![
            "contrast",
            "temperature_coefficient",
            "bias",
            "reset_pulse_ms",
            "clear_settle_ms",
            "settle_ms",
            "spi_hz",
        ]
        .contains(&key.as_str())
        {
            errors.push(format!("[display] unknown key '{}'", key));
        }
    }

    check_int(display, "display", "contrast", 0, 127, errors);
    check_int(display, "display", "temperature_coefficient", 0, 3, errors);
    check_int(display, "display", "bias", 0, 7, errors);
    check_int(display, "display", "reset_pulse_ms", 0, u32::MAX as i64, errors);
    check_int(display, "display", "clear_settle_ms", 0, u32::MAX as i64, errors);
    check_int(display, "display", "settle_ms", 0, u32::MAX as i64, errors);
    // PCD8544 serial clock tops out at 4 MHz
    check_int(display, "display", "spi_hz", 1, 4_000_000, errors);
}

/// Validate the boot splash line
fn validate_splash(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(splash) = config.get("splash").and_then(|s| s.as_table()) else {
        return;
    };

    for key in splash.keys() {
        if !["text", "x", "y", "inverted"].contains(&key.as_str()) {
            errors.push(format!("[splash] unknown key '{}'", key));
        }
    }

    match splash.get("text") {
        None => {}
        Some(toml::Value::String(text)) => {
            if text.len() > MAX_SPLASH_LEN {
                errors.push(format!("[splash] text longer than {} characters", MAX_SPLASH_LEN));
            }
            if let Some(bad) = text.chars().find(|c| !FONT_RANGE.contains(c)) {
                errors.push(format!("[splash] text has no glyph for {:?}", bad));
            }
        }
        Some(_) => errors.push("[splash] text must be a string".to_string()),
    }

    check_int(splash, "splash", "x", 0, 83, errors);
    check_int(splash, "splash", "y", 0, 47, errors);

    if let Some(inverted) = splash.get("inverted") {
        if !inverted.is_bool() {
            errors.push("[splash] inverted must be true or false".to_string());
        }
    }
}
