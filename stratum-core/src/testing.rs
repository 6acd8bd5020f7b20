//! Host-side test doubles
//!
//! The bus, control lines and delay share one [`Trace`] log so tests can
//! check the exact interleaving of commands, data, reset edges and waits.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use stratum_hal::{BusError, CoarseDelay, ControlLines, SerialBus};

/// One observable event on the panel interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Init,
    Command(u8),
    Data(u8),
    WaitIdle,
    ResetAsserted,
    ResetReleased,
    DelayMs(u32),
}

#[derive(Debug, Default)]
struct LogInner {
    entries: Vec<Trace>,
    data_mode: bool,
    writes: usize,
    fail_after: Option<usize>,
}

/// Shared event log
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<LogInner>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn entries(&self) -> Vec<Trace> {
        self.0.borrow().entries.clone()
    }

    /// Command bytes in order
    pub fn commands(&self) -> Vec<u8> {
        self.filter(|t| match t {
            Trace::Command(c) => Some(c),
            _ => None,
        })
    }

    /// Data bytes in order
    pub fn data(&self) -> Vec<u8> {
        self.filter(|t| match t {
            Trace::Data(d) => Some(d),
            _ => None,
        })
    }

    /// Forget what has been recorded
    pub fn clear(&self) {
        self.0.borrow_mut().entries.clear();
    }

    /// Make every bus write after the first `n` fail
    pub fn fail_writes_after(&self, n: usize) {
        let mut inner = self.0.borrow_mut();
        inner.fail_after = Some(inner.writes + n);
    }

    fn push(&self, trace: Trace) {
        self.0.borrow_mut().entries.push(trace);
    }

    fn filter(&self, f: impl Fn(Trace) -> Option<u8>) -> Vec<u8> {
        self.0.borrow().entries.iter().filter_map(|&t| f(t)).collect()
    }
}

/// Bus that records writes as command or data depending on the D/C line
#[derive(Debug, Clone)]
pub struct RecordingBus {
    log: Log,
}

impl RecordingBus {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl SerialBus for RecordingBus {
    fn init(&mut self) -> Result<(), BusError> {
        self.log.push(Trace::Init);
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), BusError> {
        let data_mode = {
            let mut inner = self.log.0.borrow_mut();
            if inner.fail_after.is_some_and(|n| inner.writes >= n) {
                return Err(BusError::BusyTimeout);
            }
            inner.writes += 1;
            inner.data_mode
        };
        self.log.push(if data_mode {
            Trace::Data(byte)
        } else {
            Trace::Command(byte)
        });
        Ok(())
    }

    fn read(&mut self) -> Result<u8, BusError> {
        Err(BusError::ReceiveEmpty)
    }

    fn wait_idle(&mut self) -> Result<(), BusError> {
        self.log.push(Trace::WaitIdle);
        Ok(())
    }
}

/// Control lines that feed the D/C state into the shared log
#[derive(Debug, Clone)]
pub struct RecordingLines {
    log: Log,
}

impl RecordingLines {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl ControlLines for RecordingLines {
    fn set_command_mode(&mut self) {
        self.log.0.borrow_mut().data_mode = false;
    }

    fn set_data_mode(&mut self) {
        self.log.0.borrow_mut().data_mode = true;
    }

    fn assert_reset(&mut self) {
        self.log.push(Trace::ResetAsserted);
    }

    fn release_reset(&mut self) {
        self.log.push(Trace::ResetReleased);
    }
}

/// Delay that returns at once and records the request
#[derive(Debug, Clone)]
pub struct NoDelay {
    log: Log,
}

impl NoDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl CoarseDelay for NoDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Trace::DelayMs(ms));
    }
}
