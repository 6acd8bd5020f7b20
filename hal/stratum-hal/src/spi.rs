//! Serial bus abstractions
//!
//! The display is written one byte at a time over a synchronous serial
//! link. Writes block until the shift register has drained; reads never
//! block and report an empty receive queue instead.

/// Bus transfer errors
///
/// On real hardware `write` only returns once its busy-wait has finished,
/// so the transmit side is never observed failing. The variants exist for
/// bounded or simulated buses and for the non-blocking read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Transmit queue has no free slot
    TransmitFull,
    /// Nothing has been received
    ReceiveEmpty,
    /// A bounded spin gave up waiting for the bus to go idle
    BusyTimeout,
    /// Peripheral reported a fault
    Fault,
}

/// Synchronous serial bus master
///
/// Single owner, single writer. There is no buffering and no retry: a stuck
/// bus hangs the caller inside `write` or `wait_idle`.
pub trait SerialBus {
    /// Bring the peripheral up
    fn init(&mut self) -> Result<(), BusError>;

    /// Write one byte
    ///
    /// Spins until the bus is idle with a free transmit slot, loads the
    /// byte, then spins until the transfer has completed.
    fn write(&mut self, byte: u8) -> Result<(), BusError>;

    /// Read one byte if one is waiting
    ///
    /// Returns [`BusError::ReceiveEmpty`] immediately when the bus is busy
    /// or nothing has been received.
    fn read(&mut self) -> Result<u8, BusError>;

    /// Block until the transmit queue is empty
    fn wait_idle(&mut self) -> Result<(), BusError>;

    /// Write every byte of `data` in order
    fn write_all(&mut self, data: &[u8]) -> Result<(), BusError> {
        for &byte in data {
            self.write(byte)?;
        }
        Ok(())
    }
}

impl<T: SerialBus + ?Sized> SerialBus for &mut T {
    fn init(&mut self) -> Result<(), BusError> {
        (**self).init()
    }

    fn write(&mut self, byte: u8) -> Result<(), BusError> {
        (**self).write(byte)
    }

    fn read(&mut self) -> Result<u8, BusError> {
        (**self).read()
    }

    fn wait_idle(&mut self) -> Result<(), BusError> {
        (**self).wait_idle()
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), BusError> {
        (**self).write_all(data)
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        // PCD8544 samples on the rising edge with the clock idling low and
        // tops out at 4 MHz.
        Self {
            frequency: 4_000_000,
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

impl SpiConfig {
    /// Same configuration at a different clock rate
    pub const fn with_frequency(self, frequency: u32) -> Self {
        Self { frequency, ..self }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}
