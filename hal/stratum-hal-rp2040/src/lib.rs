//! RP2040-specific HAL for the Stratum display stack
//!
//! Implements the `stratum-hal` capabilities on top of `embassy-rp`:
//!
//! - Blocking SPI transfer with a one-byte receive latch
//! - Output pins for the D/C and reset lines
//! - On-board LED indicator
//! - Coarse delays on the embassy time driver

#![no_std]

pub mod bus;
pub mod delay;
pub mod pins;

pub use bus::{spi_config, SpiSerialBus};
pub use delay::TimerDelay;
pub use pins::{Led, Pin};

// Re-export shared traits from stratum-hal for convenience
pub use stratum_hal::{BusError, CoarseDelay, ControlLines, IndicatorOutput, OutputPin, SerialBus};
