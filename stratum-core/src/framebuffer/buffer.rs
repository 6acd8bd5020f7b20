//! Flat bit-packed pixel store

use crate::geometry::{BANKS, BUFFER_SIZE, WIDTH};

/// 1bpp framebuffer in device order
///
/// Byte `bank * 84 + x` holds column `x` of bank `bank`, bit 0 at the top.
/// The length is fixed; the whole buffer is always sent on flush.
#[derive(Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Zero every byte
    pub fn clear(&mut self) {
        self.bytes.fill(0x00);
    }

    /// Store a byte directly, wrapping the index onto the buffer
    pub fn raw_write(&mut self, index: usize, value: u8) {
        self.bytes[index % BUFFER_SIZE] = value;
    }

    /// Read a byte, wrapping the index onto the buffer
    pub fn raw_read(&self, index: usize) -> u8 {
        self.bytes[index % BUFFER_SIZE]
    }

    /// Buffer contents in column-major, bank-ascending order
    pub fn contents(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// One bank (84 column bytes), wrapping the bank number
    pub fn bank(&self, bank: usize) -> &[u8] {
        let start = (bank % BANKS) * WIDTH;
        &self.bytes[start..start + WIDTH]
    }

    /// Replace the masked bits of one byte
    pub(crate) fn merge(&mut self, index: usize, mask: u8, bits: u8) {
        let byte = &mut self.bytes[index];
        *byte = (*byte & !mask) | (bits & mask);
    }
}

impl core::fmt::Debug for DisplayBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("DisplayBuffer")
            .field("len", &BUFFER_SIZE)
            .field("non_zero", &lit)
            .finish()
    }
}
