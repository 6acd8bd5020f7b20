//! Configuration loading
//!
//! The board file is compiled in from `display.toml`; build.rs has already
//! rejected anything the parser would refuse, so the fallback to defaults
//! only guards against the two drifting apart.

use defmt::*;

use stratum_core::config::{parse_config, StratumConfig};

/// Embedded configuration (edit display.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> StratumConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Display config: vop={=u8:#x} tc={} bias={} spi={}Hz",
                config.display.contrast,
                config.display.temperature_coefficient,
                config.display.bias,
                config.display.spi_hz
            );
            config
        }
        Err(e) => {
            warn!("display.toml rejected ({}), using defaults", e);
            StratumConfig::default()
        }
    }
}
