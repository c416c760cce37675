//! Mock GPIO adapter for integration tests.
//!
//! Records every driver call so tests can assert on the full call history
//! (and on its absence) without touching real GPIO lines.

use std::collections::{HashMap, HashSet};

use pinswitch::app::events::AppEvent;
use pinswitch::app::model::{LogicLevel, PinId, Polarity};
use pinswitch::app::ports::{EventSink, GpioPort};
use pinswitch::app::registry::PinRegistry;
use pinswitch::app::service::PinController;
use pinswitch::error::{HardwareError, HardwareFault};

// ── Driver call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum GpioCall {
    Configure { pin: PinId, level: LogicLevel },
    Read { pin: PinId },
}

// ── MockGpio ──────────────────────────────────────────────────

pub struct MockGpio {
    pub calls: Vec<GpioCall>,
    levels: HashMap<PinId, LogicLevel>,
    failing_reads: HashSet<PinId>,
    failing_writes: HashSet<PinId>,
}

#[allow(dead_code)]
impl MockGpio {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            levels: HashMap::new(),
            failing_reads: HashSet::new(),
            failing_writes: HashSet::new(),
        }
    }

    pub fn fail_reads_on(mut self, pin: PinId) -> Self {
        self.failing_reads.insert(pin);
        self
    }

    pub fn fail_writes_on(mut self, pin: PinId) -> Self {
        self.failing_writes.insert(pin);
        self
    }

    pub fn level(&self, pin: PinId) -> Option<LogicLevel> {
        self.levels.get(&pin).copied()
    }
}

impl Default for MockGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioPort for MockGpio {
    fn configure_output(
        &mut self,
        pin: PinId,
        initial_level: LogicLevel,
    ) -> Result<(), HardwareError> {
        self.calls.push(GpioCall::Configure {
            pin,
            level: initial_level,
        });
        if self.failing_writes.contains(&pin) {
            return Err(HardwareError::new(pin, HardwareFault::PermissionDenied));
        }
        self.levels.insert(pin, initial_level);
        Ok(())
    }

    fn read_level(&mut self, pin: PinId) -> Result<LogicLevel, HardwareError> {
        self.calls.push(GpioCall::Read { pin });
        if self.failing_reads.contains(&pin) {
            return Err(HardwareError::new(pin, HardwareFault::NotExported));
        }
        // Unconfigured lines float high through the pull-up.
        Ok(self.levels.get(&pin).copied().unwrap_or(LogicLevel::High))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Builders ──────────────────────────────────────────────────

pub type MockController = PinController<MockGpio, RecordingSink>;

#[allow(dead_code)]
pub fn outdoor_lights() -> PinRegistry {
    PinRegistry::new([(0, "Outdoor LED Lights")]).unwrap()
}

#[allow(dead_code)]
pub fn controller_with(registry: PinRegistry, gpio: MockGpio, polarity: Polarity) -> MockController {
    PinController::new(registry, polarity, gpio, RecordingSink::new())
}

#[allow(dead_code)]
pub fn calls(c: &MockController) -> Vec<GpioCall> {
    c.with_ports(|gpio, _| gpio.calls.clone())
}

#[allow(dead_code)]
pub fn events(c: &MockController) -> Vec<AppEvent> {
    c.with_ports(|_, sink| sink.events.clone())
}
