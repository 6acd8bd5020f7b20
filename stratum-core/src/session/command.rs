//! PCD8544 command encodings
//!
//! Every command is a single byte sent with the D/C line low. Commands
//! marked *basic* or *extended* are only decoded while the matching
//! instruction set is selected with [`function_set`].

use crate::geometry::{BANKS, WIDTH};

/// Raw opcodes
pub mod cmd {
    pub const FUNCTION_SET: u8 = 0x20;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const SET_Y: u8 = 0x40;
    pub const SET_X: u8 = 0x80;

    // Extended instruction set
    pub const TEMPERATURE_COEFFICIENT: u8 = 0x04;
    pub const BIAS: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;
}

/// Function-set H bit
const EXTENDED: u8 = 1 << 0;

/// Instruction set selected by function-set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InstructionSet {
    Basic,
    Extended,
}

/// Display-control modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// All segments off
    Blank,
    /// All segments on, memory ignored
    AllOn,
    /// Memory shown as-is
    Normal,
    /// Memory shown inverted
    Inverse,
}

impl DisplayMode {
    /// D and E bits of the display-control command
    const fn bits(self) -> u8 {
        match self {
            DisplayMode::Blank => 0b000,
            DisplayMode::AllOn => 0b001,
            DisplayMode::Normal => 0b100,
            DisplayMode::Inverse => 0b101,
        }
    }
}

/// Function-set: power on, horizontal addressing, given instruction set
pub const fn function_set(set: InstructionSet) -> u8 {
    match set {
        InstructionSet::Basic => cmd::FUNCTION_SET,
        InstructionSet::Extended => cmd::FUNCTION_SET | EXTENDED,
    }
}

/// Display-control (basic set)
pub const fn display_control(mode: DisplayMode) -> u8 {
    cmd::DISPLAY_CONTROL | mode.bits()
}

/// Set-X address (basic set), x wraps onto the panel width
pub const fn set_x(x: u8) -> u8 {
    cmd::SET_X | ((x as usize % WIDTH) as u8)
}

/// Set-Y bank address (basic set), bank wraps onto the bank count
pub const fn set_y(bank: u8) -> u8 {
    cmd::SET_Y | ((bank as usize % BANKS) as u8)
}

/// Operating voltage (extended set), 7-bit Vop
pub const fn set_vop(vop: u8) -> u8 {
    cmd::SET_VOP | (vop & 0x7F)
}

/// Temperature coefficient (extended set), 0-3
pub const fn temperature_coefficient(tc: u8) -> u8 {
    cmd::TEMPERATURE_COEFFICIENT | (tc & 0x03)
}

/// Bias system (extended set), 0-7
pub const fn bias(bs: u8) -> u8 {
    cmd::BIAS | (bs & 0x07)
}
