//! Bit-order reversal
//!
//! Source images are stored most-significant-bit first, the panel wants
//! bit 0 at the top of each column byte. Each byte is reversed with two
//! lookups into a 16-entry nibble table.

/// Reversed value of every nibble, built at compile time
pub const NIBBLE_REVERSE: [u8; 16] = build_nibble_table();

const fn build_nibble_table() -> [u8; 16] {
    let mut table = [0u8; 16];
    let mut n = 0;
    while n < 16 {
        let v = n as u8;
        table[n] = ((v & 0b0001) << 3)
            | ((v & 0b0010) << 1)
            | ((v & 0b0100) >> 1)
            | ((v & 0b1000) >> 3);
        n += 1;
    }
    table
}

/// Reverse the bit order of a byte
///
/// The low nibble, reversed, becomes the high nibble and vice versa.
#[inline]
pub const fn reverse_bits(byte: u8) -> u8 {
    (NIBBLE_REVERSE[(byte & 0x0F) as usize] << 4) | NIBBLE_REVERSE[(byte >> 4) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nibble_table() {
        assert_eq!(
            NIBBLE_REVERSE,
            [
                0b0000, 0b1000, 0b0100, 0b1100, 0b0010, 0b1010, 0b0110, 0b1110, 0b0001, 0b1001,
                0b0101, 0b1101, 0b0011, 0b1011, 0b0111, 0b1111,
            ]
        );
    }

    #[test]
    fn test_known_values() {
        assert_eq!(reverse_bits(0x01), 0x80);
        assert_eq!(reverse_bits(0x80), 0x01);
        assert_eq!(reverse_bits(0xF0), 0x0F);
        assert_eq!(reverse_bits(0b1100_1010), 0b0101_0011);
        assert_eq!(reverse_bits(0x00), 0x00);
        assert_eq!(reverse_bits(0xFF), 0xFF);
    }

    #[test]
    fn test_involution_exhaustive() {
        for b in 0..=u8::MAX {
            assert_eq!(reverse_bits(reverse_bits(b)), b);
        }
    }

    proptest! {
        #[test]
        fn matches_core_reverse(b in any::<u8>()) {
            prop_assert_eq!(reverse_bits(b), b.reverse_bits());
        }
    }
}
