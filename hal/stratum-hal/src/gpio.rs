//! GPIO abstractions
//!
//! The display needs two control lines besides the serial bus: D/C selects
//! whether the next byte is a command or display data, and RST (active low)
//! resets the controller.

use crate::delay::CoarseDelay;

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Command/data select and reset lines of the display controller
pub trait ControlLines {
    /// Route following bytes to the command decoder (D/C low)
    fn set_command_mode(&mut self);

    /// Route following bytes to display memory (D/C high)
    fn set_data_mode(&mut self);

    /// Hold the controller in reset
    fn assert_reset(&mut self);

    /// Let the controller out of reset
    fn release_reset(&mut self);
}

impl<T: ControlLines + ?Sized> ControlLines for &mut T {
    fn set_command_mode(&mut self) {
        (**self).set_command_mode()
    }

    fn set_data_mode(&mut self) {
        (**self).set_data_mode()
    }

    fn assert_reset(&mut self) {
        (**self).assert_reset()
    }

    fn release_reset(&mut self) {
        (**self).release_reset()
    }
}

/// Status indicator (LED)
pub trait IndicatorOutput {
    /// Switch the indicator on or off
    fn set(&mut self, on: bool);

    /// Check whether the indicator is lit
    fn is_on(&self) -> bool;
}

/// Blink an indicator `count` times, `period_ms` on then `period_ms` off
///
/// The indicator is left off.
pub fn flash<I, D>(led: &mut I, delay: &mut D, count: u8, period_ms: u32)
where
    I: IndicatorOutput + ?Sized,
    D: CoarseDelay + ?Sized,
{
    for _ in 0..count {
        led.set(true);
        delay.delay_ms(period_ms);
        led.set(false);
        delay.delay_ms(period_ms);
    }
    led.set(false);
}

/// [`ControlLines`] built from two output pins
///
/// D/C is high for data, low for commands. RST is active low.
pub struct PinControlLines<DC, RST> {
    dc: DC,
    rst: RST,
}

impl<DC: OutputPin, RST: OutputPin> PinControlLines<DC, RST> {
    /// Take ownership of the pins
    ///
    /// Reset is left released and the bus starts in command mode.
    pub fn new(mut dc: DC, mut rst: RST) -> Self {
        dc.set_low();
        rst.set_high();
        Self { dc, rst }
    }

    /// Check whether data mode is selected
    pub fn is_data_mode(&self) -> bool {
        self.dc.is_set_high()
    }

    /// Check whether reset is asserted
    pub fn is_in_reset(&self) -> bool {
        !self.rst.is_set_high()
    }

    /// Give the pins back
    pub fn release(self) -> (DC, RST) {
        (self.dc, self.rst)
    }
}

impl<DC: OutputPin, RST: OutputPin> ControlLines for PinControlLines<DC, RST> {
    fn set_command_mode(&mut self) {
        self.dc.set_low();
    }

    fn set_data_mode(&mut self) {
        self.dc.set_high();
    }

    fn assert_reset(&mut self) {
        self.rst.set_low();
    }

    fn release_reset(&mut self) {
        self.rst.set_high();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self { high }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_initial_line_state() {
        let lines = PinControlLines::new(MockPin::new(true), MockPin::new(false));

        assert!(!lines.is_data_mode());
        assert!(!lines.is_in_reset());
    }

    #[test]
    fn test_data_command_select() {
        let mut lines = PinControlLines::new(MockPin::new(false), MockPin::new(true));

        lines.set_data_mode();
        assert!(lines.is_data_mode());

        lines.set_command_mode();
        assert!(!lines.is_data_mode());
    }

    #[test]
    fn test_reset_is_active_low() {
        let mut lines = PinControlLines::new(MockPin::new(false), MockPin::new(true));

        lines.assert_reset();
        assert!(lines.is_in_reset());

        lines.release_reset();
        assert!(!lines.is_in_reset());

        let (_, rst) = lines.release();
        assert!(rst.is_set_high());
    }

    #[test]
    fn test_set_state() {
        let mut pin = MockPin::new(false);
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
    }

    struct MockLed {
        on: bool,
        toggles: u32,
    }

    impl IndicatorOutput for MockLed {
        fn set(&mut self, on: bool) {
            if on != self.on {
                self.toggles += 1;
            }
            self.on = on;
        }

        fn is_on(&self) -> bool {
            self.on
        }
    }

    struct TallyDelay(u32);

    impl CoarseDelay for TallyDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0 += ms;
        }
    }

    #[test]
    fn test_flash() {
        let mut led = MockLed { on: false, toggles: 0 };
        let mut delay = TallyDelay(0);

        flash(&mut led, &mut delay, 3, 125);

        assert!(!led.is_on());
        assert_eq!(led.toggles, 6);
        assert_eq!(delay.0, 750);
    }

    #[test]
    fn test_flash_zero_times_turns_off() {
        let mut led = MockLed { on: true, toggles: 0 };
        let mut delay = TallyDelay(0);

        flash(&mut led, &mut delay, 0, 125);

        assert!(!led.is_on());
        assert_eq!(delay.0, 0);
    }
}
