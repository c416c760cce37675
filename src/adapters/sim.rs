//! Simulated GPIO line.
//!
//! [`SimPin`] implements the `embedded-hal` digital output traits entirely in
//! memory, so the full service runs on a development host (`--simulate`)
//! and in tests.  A [`SimHandle`] cloned from the pin stays with the caller
//! to inspect the line or inject faults after the pin has been moved into
//! a driver.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, StatefulOutputPin};
use log::trace;

/// Failure injected into a simulated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    WriteFailed,
    ReadFailed,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "simulated write failure"),
            Self::ReadFailed => write!(f, "simulated read failure"),
        }
    }
}

impl embedded_hal::digital::Error for SimError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug, Default)]
struct SimLine {
    high: AtomicBool,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    delay_ms: AtomicU64,
    writes: AtomicU64,
}

/// In-memory output pin.  Lines power up high (device off on active-low
/// wiring).
#[derive(Debug, Clone)]
pub struct SimPin {
    line: Arc<SimLine>,
}

/// Shared view of a [`SimPin`]'s line.
#[derive(Debug, Clone)]
pub struct SimHandle {
    line: Arc<SimLine>,
}

impl SimPin {
    pub fn new() -> Self {
        let line = SimLine::default();
        line.high.store(true, Ordering::SeqCst);
        Self {
            line: Arc::new(line),
        }
    }

    pub fn handle(&self) -> SimHandle {
        SimHandle {
            line: Arc::clone(&self.line),
        }
    }

    fn stall(&self) {
        let ms = self.line.delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }

    fn drive(&mut self, high: bool) -> Result<(), SimError> {
        self.stall();
        if self.line.fail_writes.load(Ordering::SeqCst) {
            return Err(SimError::WriteFailed);
        }
        trace!("sim line -> {}", u8::from(high));
        self.line.high.store(high, Ordering::SeqCst);
        self.line.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn sense(&mut self) -> Result<bool, SimError> {
        self.stall();
        if self.line.fail_reads.load(Ordering::SeqCst) {
            return Err(SimError::ReadFailed);
        }
        Ok(self.line.high.load(Ordering::SeqCst))
    }
}

impl Default for SimPin {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHandle {
    /// Current electrical level of the line.
    pub fn is_high(&self) -> bool {
        self.line.high.load(Ordering::SeqCst)
    }

    /// Force the line level from outside (e.g. someone else drove it).
    pub fn set_high(&self, high: bool) {
        self.line.high.store(high, Ordering::SeqCst);
    }

    /// Number of successful writes.
    pub fn writes(&self) -> u64 {
        self.line.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.line.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.line.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every access block for `delay` first (stuck bus).
    pub fn set_delay(&self, delay: Duration) {
        self.line
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

impl ErrorType for SimPin {
    type Error = SimError;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.sense()
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.sense().map(|high| !high)
    }
}
