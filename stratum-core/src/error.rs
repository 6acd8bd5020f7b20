//! Error types

use stratum_hal::BusError;

/// Text rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Character has no glyph in the font table
    OutOfRangeGlyph(u8),
}

/// Errors reported by the protocol session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Serial bus transfer failed
    Bus(BusError),
    /// Text could not be rendered
    Text(TextError),
    /// Session has not finished bring-up
    NotReady,
    /// Requested state change is not allowed from the current state
    InvalidTransition,
}

impl From<BusError> for DisplayError {
    fn from(e: BusError) -> Self {
        DisplayError::Bus(e)
    }
}

impl From<TextError> for DisplayError {
    fn from(e: TextError) -> Self {
        DisplayError::Text(e)
    }
}
