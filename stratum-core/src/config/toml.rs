//! Minimal TOML parser for the display configuration
//!
//! Handles only the subset a board file needs. It does NOT support the
//! full TOML spec.
//!
//! Supported features:
//! - `[display]` and `[splash]` section headers
//! - Key = value pairs (integer, hex integer, boolean, string)
//! - Comments (# ...), whole-line and trailing
//!
//! Unknown sections and keys are errors, so a typo never silently falls
//! back to a default.

use heapless::String as HString;

use super::{
    DisplayConfig, SplashConfig, StratumConfig, MAX_BIAS, MAX_CONTRAST,
    MAX_SPI_HZ, MAX_TEMPERATURE_COEFFICIENT,
};
use crate::font::FontTable;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Unknown key, or a key outside any section
    InvalidKey,
    /// Value has the wrong type or cannot be parsed
    InvalidValue,
    /// Value parsed but is outside the allowed range
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Splash,
}

/// Parse TOML text into a [`StratumConfig`]
///
/// Keys that are not present keep their defaults.
pub fn parse_config(input: &str) -> Result<StratumConfig, ParseError> {
    let mut config = StratumConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 2 {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match section {
            Section::Display => apply_display(&mut config.display, key, value)?,
            Section::Splash => apply_splash(&mut config.splash, key, value)?,
            Section::Root => return Err(ParseError::InvalidKey),
        }
    }

    if !config.splash.in_bounds() {
        return Err(ParseError::OutOfRange);
    }

    Ok(config)
}

/// Parse section header text (without brackets)
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "splash" => Ok(Section::Splash),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment, ignoring `#` inside a quoted string
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

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse a decimal or `0x` hex integer, with `_` separators
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::OutOfRange)?;
    }
    Ok(result)
}

/// Parse an integer no larger than `max`
fn parse_bounded(value: &str, max: u32) -> Result<u32, ParseError> {
    let n = parse_int(value)?;
    if n > max {
        return Err(ParseError::OutOfRange);
    }
    Ok(n)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_display(display: &mut DisplayConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "contrast" => display.contrast = parse_bounded(value, MAX_CONTRAST as u32)? as u8,
        "temperature_coefficient" => {
            display.temperature_coefficient =
                parse_bounded(value, MAX_TEMPERATURE_COEFFICIENT as u32)? as u8
        }
        "bias" => display.bias = parse_bounded(value, MAX_BIAS as u32)? as u8,
        "reset_pulse_ms" => display.reset_pulse_ms = parse_int(value)?,
        "clear_settle_ms" => display.clear_settle_ms = parse_int(value)?,
        "settle_ms" => display.settle_ms = parse_int(value)?,
        "spi_hz" => {
            let hz = parse_bounded(value, MAX_SPI_HZ)?;
            if hz == 0 {
                return Err(ParseError::OutOfRange);
            }
            display.spi_hz = hz;
        }
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}

fn apply_splash(splash: &mut SplashConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "text" => {
            let text = parse_string(value)?;
            FontTable::check(text).map_err(|_| ParseError::InvalidValue)?;
            splash.text = HString::try_from(text).map_err(|_| ParseError::OutOfRange)?;
        }
        "x" => splash.x = parse_bounded(value, u8::MAX as u32)? as u8,
        "y" => splash.y = parse_bounded(value, u8::MAX as u32)? as u8,
        "inverted" => splash.inverted = parse_bool(value)?,
        _ => return Err(ParseError::InvalidKey),
    }
    Ok(())
}
