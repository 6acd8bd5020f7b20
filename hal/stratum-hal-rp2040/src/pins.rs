//! GPIO outputs
//!
//! Thin wrappers so embassy's `Output` can stand in for the `stratum-hal`
//! pin and indicator traits.

use embassy_rp::gpio::Output;
use stratum_hal::{IndicatorOutput, OutputPin};

/// Push-pull output pin
pub struct Pin<'d>(Output<'d>);

impl<'d> Pin<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for Pin<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// LED on a GPIO, optionally wired active-low
pub struct Led<'d> {
    output: Output<'d>,
    active_low: bool,
}

impl<'d> Led<'d> {
    /// LED lit when the pin is high
    pub fn new(output: Output<'d>) -> Self {
        Self {
            output,
            active_low: false,
        }
    }

    /// LED lit when the pin is low
    pub fn active_low(output: Output<'d>) -> Self {
        Self {
            output,
            active_low: true,
        }
    }
}

impl IndicatorOutput for Led<'_> {
    fn set(&mut self, on: bool) {
        if on != self.active_low {
            self.output.set_high();
        } else {
            self.output.set_low();
        }
    }

    fn is_on(&self) -> bool {
        self.output.is_set_high() != self.active_low
    }
}
