//! Display configuration
//!
//! Bring-up parameters for the panel plus the splash line the firmware
//! draws at boot. Defaults reproduce the stock bring-up; boards override
//! them from an embedded TOML file (see [`toml`]).

pub mod toml;

use heapless::String;

use crate::geometry::{HEIGHT, WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::toml::{parse_config, ParseError};

/// Maximum splash text length (one full row of 7-column cells)
pub const MAX_SPLASH_LEN: usize = WIDTH / 7;

/// Largest operating voltage value (7-bit field)
pub const MAX_CONTRAST: u8 = 0x7F;

/// Largest temperature coefficient
pub const MAX_TEMPERATURE_COEFFICIENT: u8 = 3;

/// Largest bias system value
pub const MAX_BIAS: u8 = 7;

/// Fastest serial clock the controller accepts
pub const MAX_SPI_HZ: u32 = 4_000_000;

/// Panel bring-up parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Operating voltage (Vop), 0-127
    pub contrast: u8,
    /// Temperature coefficient, 0-3
    pub temperature_coefficient: u8,
    /// Bias system, 0-7
    pub bias: u8,
    /// Reset line low time
    pub reset_pulse_ms: u32,
    /// Wait after zeroing device memory
    pub clear_settle_ms: u32,
    /// Wait before switching from all-on to normal mode
    pub settle_ms: u32,
    /// Serial clock
    pub spi_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            contrast: 0x40,
            temperature_coefficient: 0,
            bias: 4,
            reset_pulse_ms: 125,
            clear_settle_ms: 625,
            settle_ms: 125,
            spi_hz: 3_000_000,
        }
    }
}

/// Line drawn once at boot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplashConfig {
    /// Text, printable ASCII only
    pub text: String<MAX_SPLASH_LEN>,
    /// Left edge of the text in pixels
    pub x: u8,
    /// Top row in pixels
    pub y: u8,
    /// Draw as a highlighted (inverted) row
    pub inverted: bool,
}

impl Default for SplashConfig {
    fn default() -> Self {
        let mut text = String::new();
        // Fits: 11 bytes into a capacity of 12
        let _ = text.push_str("H E L L O !");
        Self {
            text,
            x: 5,
            y: 20,
            inverted: true,
        }
    }
}

impl SplashConfig {
    /// Whether the position is on the panel
    pub fn in_bounds(&self) -> bool {
        (self.x as usize) < WIDTH && (self.y as usize) < HEIGHT
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StratumConfig {
    pub display: DisplayConfig,
    pub splash: SplashConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_bring_up() {
        let config = DisplayConfig::default();
        assert_eq!(config.contrast, 0x40);
        assert_eq!(config.temperature_coefficient, 0);
        assert_eq!(config.bias, 4);
        assert!(config.contrast <= MAX_CONTRAST);
    }

    #[test]
    fn test_default_splash() {
        let splash = SplashConfig::default();
        assert_eq!(splash.text.as_str(), "H E L L O !");
        assert_eq!((splash.x, splash.y), (5, 20));
        assert!(splash.inverted);
        assert!(splash.in_bounds());
    }

    #[test]
    fn test_splash_bounds() {
        let mut splash = SplashConfig::default();
        splash.x = WIDTH as u8;
        assert!(!splash.in_bounds());
        splash.x = 0;
        splash.y = HEIGHT as u8;
        assert!(!splash.in_bounds());
    }
}
