//! Text and image drawing
//!
//! Every character cell is seven columns wide: a blank pad column, the five
//! glyph columns, another blank pad. Strings are not wrapped or clipped;
//! once the cursor passes column 83 it carries on from column 0 of the same
//! row.
//!
//! Inverted text is drawn by XORing every column byte, pads included, with
//! a fill mask of `0xFF`.

use crate::bits::reverse_bits;
use crate::error::TextError;
use crate::font::{FontTable, Glyph, GLYPH_WIDTH};
use crate::framebuffer::Display;
use crate::geometry::WIDTH;

/// Columns used by one character, pads included
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 2;

/// Fill mask for normal text
pub const FILL_NORMAL: u8 = 0x00;

/// Fill mask for inverted text
pub const FILL_INVERTED: u8 = 0xFF;

/// Column bytes of one padded character cell
pub(crate) fn cell_columns(glyph: &Glyph, mask: u8) -> [u8; GLYPH_ADVANCE] {
    let mut cell = [mask; GLYPH_ADVANCE];
    for (slot, column) in cell[1..=GLYPH_WIDTH].iter_mut().zip(glyph) {
        *slot = column ^ mask;
    }
    cell
}

impl Display {
    /// Draw one character at the cursor
    ///
    /// Characters without a glyph are rejected and nothing is drawn.
    pub fn write_glyph(&mut self, ch: u8) -> Result<(), TextError> {
        let glyph = FontTable::glyph(ch)?;
        self.write_bytes(&cell_columns(glyph, FILL_NORMAL));
        Ok(())
    }

    /// Draw a string at the cursor
    ///
    /// The string is checked up front, so a bad character leaves the
    /// buffer untouched.
    pub fn write_string(&mut self, text: &str) -> Result<(), TextError> {
        self.write_cells(text, FILL_NORMAL)
    }

    /// Draw a string on a text row and move to the start of the next row
    ///
    /// As with [`Display::set_text_cursor`], an out-of-range row is ignored
    /// and the text goes wherever the cursor already is.
    pub fn write_line(&mut self, row: u8, text: &str) -> Result<(), TextError> {
        FontTable::check(text)?;
        self.set_text_cursor(0, row);
        self.write_cells(text, FILL_NORMAL)?;
        self.set_text_cursor(0, row.saturating_add(1));
        Ok(())
    }

    /// Draw a full-width row of text starting at pixel `(x0, y0)`
    ///
    /// Columns `[0, x0)` before the text and from the end of the text to
    /// the right edge are filled too. With `invert` set every byte,
    /// padding and glyphs alike, is complemented, giving a highlighted
    /// line. Text that runs past the right edge wraps and gets no
    /// trailing fill.
    pub fn write_row(
        &mut self,
        x0: usize,
        y0: usize,
        invert: bool,
        text: &str,
    ) -> Result<(), TextError> {
        FontTable::check(text)?;
        let mask = if invert { FILL_INVERTED } else { FILL_NORMAL };
        let x0 = x0 % WIDTH;

        self.set_pixel_cursor(0, y0);
        for _ in 0..x0 {
            self.write_byte(mask);
        }

        self.set_pixel_cursor(x0, y0);
        self.write_cells(text, mask)?;

        let end = x0 + text.len() * GLYPH_ADVANCE;
        for _ in end.min(WIDTH)..WIDTH {
            self.write_byte(mask);
        }
        Ok(())
    }

    /// Blit raw MSB-first image bytes starting at pixel `(x0, y0)`
    ///
    /// Each byte is bit-reversed into the panel's LSB-at-top column format
    /// and written like any other column byte.
    pub fn draw_image(&mut self, data: &[u8], x0: usize, y0: usize) {
        self.set_pixel_cursor(x0, y0);
        for &byte in data {
            self.write_byte(reverse_bits(byte));
        }
    }

    fn write_cells(&mut self, text: &str, mask: u8) -> Result<(), TextError> {
        FontTable::check(text)?;
        for ch in text.bytes() {
            let glyph = FontTable::glyph(ch)?;
            self.write_bytes(&cell_columns(glyph, mask));
        }
        Ok(())
    }
}
