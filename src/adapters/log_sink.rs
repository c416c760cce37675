//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events through the `log`
//! facade (stderr via `env_logger` in the binary).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Switched { pin, from, to } => {
                info!("SWITCH | GPIO {} | {:?} -> {}", pin, from, to);
            }
            AppEvent::Read { pin, level, state } => {
                log::debug!("READ | GPIO {} | level={} state={}", pin, level, state);
            }
            AppEvent::HardwareFault { pin, fault } => {
                warn!("FAULT | GPIO {} | {}", pin, fault);
            }
            AppEvent::UnknownPin(pin) => {
                warn!("REJECT | unknown pin {}", pin);
            }
            AppEvent::InvalidAction { pin, action } => {
                warn!("REJECT | GPIO {} | invalid action '{}'", pin, action);
            }
        }
    }
}
