//! SPI serial bus
//!
//! Wraps any blocking `embedded-hal` SPI bus (in practice
//! `embassy_rp::spi::Spi<'_, _, Blocking>`). Every write is a full-duplex
//! one-byte transfer; the byte clocked in at the same time is latched and
//! handed out by the next `read`.

use embassy_rp::spi;
use embedded_hal::spi::SpiBus;
use stratum_hal::spi::{Phase, Polarity};
use stratum_hal::{BusError, SerialBus, SpiConfig};

/// [`SerialBus`] over a blocking SPI peripheral
pub struct SpiSerialBus<S> {
    spi: S,
    rx: Option<u8>,
}

impl<S: SpiBus<u8>> SpiSerialBus<S> {
    /// Wrap an already configured SPI bus
    pub fn new(spi: S) -> Self {
        Self { spi, rx: None }
    }

    /// Give the SPI bus back
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: SpiBus<u8>> SerialBus for SpiSerialBus<S> {
    fn init(&mut self) -> Result<(), BusError> {
        self.rx = None;
        self.spi.flush().map_err(|_| BusError::Fault)
    }

    fn write(&mut self, byte: u8) -> Result<(), BusError> {
        let mut frame = [byte];
        self.spi
            .transfer_in_place(&mut frame)
            .map_err(|_| BusError::Fault)?;
        self.rx = Some(frame[0]);
        Ok(())
    }

    fn read(&mut self) -> Result<u8, BusError> {
        self.rx.take().ok_or(BusError::ReceiveEmpty)
    }

    fn wait_idle(&mut self) -> Result<(), BusError> {
        self.spi.flush().map_err(|_| BusError::Fault)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), BusError> {
        // Nothing reads back during bulk writes, so skip the per-byte latch
        self.spi.write(data).map_err(|_| BusError::Fault)?;
        self.rx = None;
        Ok(())
    }
}

/// Build the embassy SPI configuration
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}
