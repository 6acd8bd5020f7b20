//! Stratum - PCD8544 display firmware
//!
//! Brings up an 84x48 Nokia 5110 panel on a Raspberry Pi Pico and draws a
//! single highlighted line of text, then idles.
//!
//! Wiring (SPI0):
//!
//! | Panel | GPIO |
//! |-------|------|
//! | CLK   | 18   |
//! | DIN   | 19   |
//! | CE    | 17 (held low) |
//! | DC    | 20   |
//! | RST   | 21   |
//!
//! GPIO 16 is claimed as MISO so the bus runs full duplex; the panel
//! leaves it unconnected.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::Spi;
use {defmt_rtt as _, panic_probe as _};

use stratum_core::config::SplashConfig;
use stratum_core::{DisplayError, Pcd8544};
use stratum_hal::{
    flash, CoarseDelay, ControlLines, IndicatorOutput, PinControlLines, SerialBus, SpiConfig,
};
use stratum_hal_rp2040::{spi_config, Led, Pin, SpiSerialBus, TimerDelay};

mod config;

/// Blink period for the status LED
const BLINK_MS: u32 = 125;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Stratum firmware starting...");

    // Clocks and peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // On-board LED: one blink shows the core is alive
    let mut led = Led::new(Output::new(p.PIN_25, Level::Low));
    flash(&mut led, &mut TimerDelay, 1, BLINK_MS);

    let config = config::load();

    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        spi_config(&SpiConfig::default().with_frequency(config.display.spi_hz)),
    );
    let _chip_enable = Output::new(p.PIN_17, Level::Low);
    let lines = PinControlLines::new(
        Pin::new(Output::new(p.PIN_20, Level::Low)),
        Pin::new(Output::new(p.PIN_21, Level::High)),
    );

    let mut session = Pcd8544::new(SpiSerialBus::new(spi), lines, TimerDelay, config.display);

    match show_splash(&mut session, &config.splash) {
        Ok(()) => {
            info!("Display ready");
            led.set(true);
        }
        Err(e) => {
            error!("Display bring-up failed: {}", e);
            flash(&mut led, &mut TimerDelay, 5, BLINK_MS);
        }
    }

    // Nothing left to do; the panel keeps showing its memory
    core::future::pending::<()>().await;
}

/// Bring the panel up and show the configured splash line
fn show_splash<B, C, D>(
    session: &mut Pcd8544<B, C, D>,
    splash: &SplashConfig,
) -> Result<(), DisplayError>
where
    B: SerialBus,
    C: ControlLines,
    D: CoarseDelay,
{
    session.initialize()?;
    session.display_mut().write_row(
        splash.x as usize,
        splash.y as usize,
        splash.inverted,
        &splash.text,
    )?;
    session.flush()
}
