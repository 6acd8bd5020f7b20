//! Write cursor
//!
//! Tracks the logical pixel position together with the buffer address it
//! maps to, so byte writes never recompute it from scratch.

use crate::geometry::{
    PixelCoordinate, MAX_TEXT_COLUMN, MAX_TEXT_ROW, PIXELS_PER_BYTE, TEXT_COLUMN_WIDTH, WIDTH,
};

/// Current write position
///
/// Invariant: `byte_index == bank(y) * 84 + x` and `bit_offset == y % 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    byte_index: usize,
    bit_offset: u8,
    x: u8,
    y: u8,
}

impl Cursor {
    /// Cursor at the top-left pixel
    pub const fn origin() -> Self {
        Self {
            byte_index: 0,
            bit_offset: 0,
            x: 0,
            y: 0,
        }
    }

    /// Cursor at a pixel, wrapping x to 0..84 and y to 0..48
    pub const fn at(x: usize, y: usize) -> Self {
        let p = PixelCoordinate::wrapping(x, y);
        Self {
            byte_index: p.byte_index(),
            bit_offset: p.bit_offset(),
            x: p.x,
            y: p.y,
        }
    }

    /// Cursor at a text cell
    ///
    /// Returns `None` when the cell is past the last text column or row.
    pub const fn at_text(col: u8, row: u8) -> Option<Self> {
        if col > MAX_TEXT_COLUMN || row > MAX_TEXT_ROW {
            return None;
        }
        Some(Self::at(
            col as usize * TEXT_COLUMN_WIDTH,
            row as usize * PIXELS_PER_BYTE,
        ))
    }

    /// Move one column right, wrapping at the panel edge
    ///
    /// The row and bit offset stay where they are.
    pub fn advance_column(&mut self) {
        self.x = ((self.x as usize + 1) % WIDTH) as u8;
        self.byte_index = self.position().byte_index();
        self.check();
    }

    /// Pixel position
    pub const fn position(&self) -> PixelCoordinate {
        PixelCoordinate { x: self.x, y: self.y }
    }

    /// Text cell containing the cursor
    pub const fn text_position(&self) -> (u8, u8) {
        (
            self.x / TEXT_COLUMN_WIDTH as u8,
            self.y / PIXELS_PER_BYTE as u8,
        )
    }

    /// Buffer index of the byte under the cursor
    pub const fn byte_index(&self) -> usize {
        self.byte_index
    }

    /// Bit position inside that byte
    pub const fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    #[inline]
    fn check(&self) {
        debug_assert_eq!(self.byte_index, self.position().byte_index());
        debug_assert_eq!(self.bit_offset, self.position().bit_offset());
    }
}
