//! Panel geometry
//!
//! The panel is 84 columns by 48 rows. Rows are grouped into six 8-row
//! banks; one byte holds the 8 pixels of one column within one bank, bit 0
//! at the top.

/// Panel width in pixels
pub const WIDTH: usize = 84;

/// Panel height in pixels
pub const HEIGHT: usize = 48;

/// Pixels packed into one buffer byte
pub const PIXELS_PER_BYTE: usize = 8;

/// Number of 8-row banks
pub const BANKS: usize = HEIGHT / PIXELS_PER_BYTE;

/// Framebuffer size in bytes
pub const BUFFER_SIZE: usize = WIDTH * BANKS;

/// Pixel pitch of one text column
pub const TEXT_COLUMN_WIDTH: usize = 5;

/// Highest text column accepted by the text cursor
pub const MAX_TEXT_COLUMN: u8 = 11;

/// Highest text row accepted by the text cursor
pub const MAX_TEXT_ROW: u8 = (BANKS - 1) as u8;

/// A pixel position, always inside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelCoordinate {
    /// Column, 0..=83
    pub x: u8,
    /// Row, 0..=47
    pub y: u8,
}

impl PixelCoordinate {
    /// Build a coordinate, wrapping out-of-range input onto the panel
    pub const fn wrapping(x: usize, y: usize) -> Self {
        Self {
            x: (x % WIDTH) as u8,
            y: (y % HEIGHT) as u8,
        }
    }

    /// Bank holding this row (0..=5)
    pub const fn bank(&self) -> usize {
        self.y as usize / PIXELS_PER_BYTE
    }

    /// Bit position inside the bank byte (0..=7)
    pub const fn bit_offset(&self) -> u8 {
        (self.y as usize % PIXELS_PER_BYTE) as u8
    }

    /// Buffer index of the byte holding this pixel
    pub const fn byte_index(&self) -> usize {
        self.bank() * WIDTH + self.x as usize
    }
}
