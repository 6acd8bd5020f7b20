//! Stratum Hardware Abstraction Layer
//!
//! This crate defines the capabilities the display stack consumes from the
//! board. Chip-specific crates (RP2040, ...) implement them; the core crate
//! only ever sees these traits, so every piece of driver logic can run
//! against a test double on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (stratum-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stratum-core (framebuffer, session)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stratum-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ stratum-hal-    │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SerialBus`] - Blocking byte transfer over the 4-wire link
//! - [`gpio::ControlLines`] - Data/command select and reset lines
//! - [`gpio::OutputPin`] - Digital output used to build control lines
//! - [`gpio::IndicatorOutput`] - Status LED
//! - [`delay::CoarseDelay`] - Approximate reset/settle timing

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::{CoarseDelay, SpinDelay};
pub use gpio::{flash, ControlLines, IndicatorOutput, OutputPin, PinControlLines};
pub use spi::{BusError, SerialBus, SpiConfig};
