//! Port traits: the hexagonal boundary between the controller and the
//! outside world.
//!
//! ```text
//!   GPIO adapter ──▶ GpioPort ──▶ PinController ──▶ EventSink ──▶ log adapter
//! ```
//!
//! Driven adapters (sysfs, embedded-hal pins, simulation, test fakes)
//! implement [`GpioPort`].  The controller consumes it via generics, so the
//! domain core never touches hardware directly.

use crate::app::model::{LogicLevel, PinId};
use crate::error::HardwareError;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ hardware)
// ───────────────────────────────────────────────────────────────

/// The sole interface to physical GPIO lines.
///
/// Implementations are not expected to retry.  Callers serialise access:
/// the controller holds its lock across every call.
pub trait GpioPort {
    /// Switch `pin` to output and drive it to `initial_level`.
    ///
    /// Where the platform allows it, direction and level are set in one
    /// operation so that no floating intermediate state is observable.
    fn configure_output(&mut self, pin: PinId, initial_level: LogicLevel)
    -> Result<(), HardwareError>;

    /// Read the current level of `pin`, whatever its direction.
    fn read_level(&mut self, pin: PinId) -> Result<LogicLevel, HardwareError>;
}

impl<G: GpioPort + ?Sized> GpioPort for Box<G> {
    fn configure_output(
        &mut self,
        pin: PinId,
        initial_level: LogicLevel,
    ) -> Result<(), HardwareError> {
        (**self).configure_output(pin, initial_level)
    }

    fn read_level(&mut self, pin: PinId) -> Result<LogicLevel, HardwareError> {
        (**self).read_level(pin)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}
