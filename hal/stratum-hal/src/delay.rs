//! Coarse delays
//!
//! Reset pulses and settle times only need to be "long enough". The
//! counted-loop delay here is calibrated to the core clock, not to wall
//! time, and is accurate to a small factor at best.

/// Approximate blocking delay
pub trait CoarseDelay {
    /// Block for roughly `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: CoarseDelay + ?Sized> CoarseDelay for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Approximate core cycles spent per loop iteration (decrement, compare,
/// branch and the spin hint)
const CYCLES_PER_ITERATION: u32 = 4;

/// Counted busy-loop delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinDelay {
    iterations_per_ms: u32,
}

impl SpinDelay {
    /// Calibrate for a core clock in Hz
    pub const fn new(core_clock_hz: u32) -> Self {
        let per_ms = core_clock_hz / 1000 / CYCLES_PER_ITERATION;
        Self {
            iterations_per_ms: if per_ms == 0 { 1 } else { per_ms },
        }
    }

    /// Loop iterations spent per millisecond
    pub const fn iterations_per_ms(&self) -> u32 {
        self.iterations_per_ms
    }
}

impl CoarseDelay for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            let mut count = self.iterations_per_ms;
            while core::hint::black_box(count) > 0 {
                core::hint::spin_loop();
                count -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration() {
        assert_eq!(SpinDelay::new(80_000_000).iterations_per_ms(), 20_000);
        assert_eq!(SpinDelay::new(125_000_000).iterations_per_ms(), 31_250);
    }

    #[test]
    fn test_slow_clock_never_zero() {
        assert_eq!(SpinDelay::new(0).iterations_per_ms(), 1);
        assert_eq!(SpinDelay::new(3_000).iterations_per_ms(), 1);
    }

    #[test]
    fn test_delay_returns() {
        let mut delay = SpinDelay::new(4_000);
        delay.delay_ms(3);
        (&mut delay).delay_ms(0);
    }
}
