//! Outbound controller events.
//!
//! The [`PinController`](super::service::PinController) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (log line, test recorder, ...).

use crate::app::model::{DeviceState, LogicLevel, PinId};
use crate::error::HardwareFault;
use crate::fsm::PinState;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A write succeeded and the pin now drives `state`.
    Switched {
        pin: PinId,
        from: PinState,
        to: DeviceState,
    },

    /// A status read completed.
    Read {
        pin: PinId,
        level: LogicLevel,
        state: DeviceState,
    },

    /// The driver failed; cached state was left unchanged.
    HardwareFault { pin: PinId, fault: HardwareFault },

    /// A request named a pin that is not registered.
    UnknownPin(PinId),

    /// A request carried an unrecognised action string.
    InvalidAction { pin: PinId, action: String },
}
