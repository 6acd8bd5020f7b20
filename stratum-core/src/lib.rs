//! Board-agnostic display logic for PCD8544 (Nokia 5110) panels
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller:
//!
//! - Framebuffer with a bit-level write cursor
//! - Built-in 5x8 font and text/row/image drawing
//! - Protocol session: command framing, bring-up, full-buffer flush
//! - Display configuration and its TOML loader
//!
//! Hardware access goes through the traits in `stratum-hal`.
//!
//! ```text
//!  text ──▶ Display (buffer + cursor) ──flush──▶ Pcd8544 ──▶ SerialBus
//!                                                   │
//!                                                   └──▶ ControlLines
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bits;
pub mod config;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod geometry;
pub mod session;
pub mod text;

#[cfg(test)]
mod testing;

pub use config::{DisplayConfig, SplashConfig, StratumConfig};
pub use error::{DisplayError, TextError};
pub use font::FontTable;
pub use framebuffer::{Cursor, Display, DisplayBuffer};
pub use geometry::PixelCoordinate;
pub use session::{DisplayMode, Pcd8544, SessionState};
