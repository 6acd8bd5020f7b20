//! Blocking delay on the embassy time driver

use embassy_time::{block_for, Duration};
use stratum_hal::CoarseDelay;

/// [`CoarseDelay`] that spins on the system timer
///
/// Unlike a counted loop this does not drift with the core clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

impl CoarseDelay for TimerDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
