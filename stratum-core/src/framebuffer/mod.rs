//! Framebuffer and cursor
//!
//! [`Display`] owns the pixel store and the write cursor. Every drawing
//! operation goes through it by `&mut` reference; nothing here touches the
//! bus.
//!
//! # Bank straddling
//!
//! A column byte written while the cursor sits mid-bank covers two buffer
//! bytes. With the cursor at bit offset 3:
//!
//! ```text
//!   data bit:   7 6 5 4 3 2 1 0
//!               └──┬───┘ └─┬─┘
//!  bank n+1 bits 0-2    bank n bits 3-7
//! ```
//!
//! Past the last bank the spill wraps to bank 0 of the same column, the
//! same way the cursor row wraps at 48.

mod buffer;
mod cursor;

pub use buffer::DisplayBuffer;
pub use cursor::Cursor;

use crate::geometry::{PixelCoordinate, BUFFER_SIZE, PIXELS_PER_BYTE, WIDTH};

/// Framebuffer plus write cursor
#[derive(Debug, Clone, Default)]
pub struct Display {
    buffer: DisplayBuffer,
    cursor: Cursor,
}

impl Display {
    /// Blank display with the cursor at the origin
    pub const fn new() -> Self {
        Self {
            buffer: DisplayBuffer::new(),
            cursor: Cursor::origin(),
        }
    }

    /// Zero the buffer and home the cursor
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = Cursor::origin();
    }

    /// Move the cursor to a pixel, wrapping out-of-range coordinates
    pub fn set_pixel_cursor(&mut self, x: usize, y: usize) {
        self.cursor = Cursor::at(x, y);
    }

    /// Move the cursor to a text cell (5 pixels wide, one bank tall)
    ///
    /// Cells past column 11 or row 5 are ignored: the cursor stays put and
    /// `false` is returned.
    pub fn set_text_cursor(&mut self, col: u8, row: u8) -> bool {
        match Cursor::at_text(col, row) {
            Some(cursor) => {
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    /// Cursor position in pixels
    pub fn pixel_cursor(&self) -> PixelCoordinate {
        self.cursor.position()
    }

    /// Cursor position in text cells
    pub fn text_cursor(&self) -> (u8, u8) {
        self.cursor.text_position()
    }

    /// Full cursor state
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Set or clear the single pixel under the cursor
    ///
    /// The cursor does not move.
    pub fn write_bit(&mut self, value: bool) {
        let mask = 1u8 << self.cursor.bit_offset();
        let bits = if value { mask } else { 0 };
        self.buffer.merge(self.cursor.byte_index(), mask, bits);
    }

    /// Light the pixel under the cursor
    pub fn write_pixel(&mut self) {
        self.write_bit(true);
    }

    /// Write one column byte at the cursor and advance one column
    ///
    /// Bit 0 of `byte` lands on the cursor row, bit 7 seven rows below it.
    /// When the cursor is mid-bank the upper part spills into the next
    /// bank's byte in the same column.
    pub fn write_byte(&mut self, byte: u8) {
        let offset = self.cursor.bit_offset();
        let index = self.cursor.byte_index();

        self.buffer.merge(index, 0xFF << offset, byte << offset);
        if offset > 0 {
            let spill = PIXELS_PER_BYTE as u8 - offset;
            let next = (index + WIDTH) % BUFFER_SIZE;
            self.buffer.merge(next, 0xFF >> spill, byte >> spill);
        }

        self.cursor.advance_column();
    }

    /// Write a run of column bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Read one pixel (coordinates wrap like the cursor)
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let p = PixelCoordinate::wrapping(x, y);
        self.buffer.raw_read(p.byte_index()) & (1 << p.bit_offset()) != 0
    }

    /// The pixel store
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Mutable pixel store, for raw blits
    pub fn buffer_mut(&mut self) -> &mut DisplayBuffer {
        &mut self.buffer
    }

    /// Buffer contents in device order
    pub fn contents(&self) -> &[u8; BUFFER_SIZE] {
        self.buffer.contents()
    }
}
