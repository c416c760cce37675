//! Pin controller: the hexagonal core.
//!
//! [`PinController`] owns the registry, the per-pin state table and the
//! injected ports.  It validates every request against the registry before
//! any hardware is touched, translates actions into driver calls through
//! the configured [`Polarity`], and converts driver failures into the error
//! taxonomy in [`crate::error`].
//!
//! ```text
//!                 ┌──────────────────────────┐
//!  HTTP / CLI ──▶ │      PinController       │ ──▶ EventSink
//!                 │ Registry · PinStateTable │
//!     GpioPort ◀──│     (one global lock)    │
//!                 └──────────────────────────┘
//! ```
//!
//! All hardware access happens while holding a single mutex, so concurrent
//! requests never interleave a write and a read on the same line.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::app::commands::Action;
use crate::app::events::AppEvent;
use crate::app::model::{DeviceState, LogicLevel, PinId, PinRecord, Polarity};
use crate::app::ports::{EventSink, GpioPort};
use crate::app::registry::{PinRegistry, RegisteredPin};
use crate::error::{ControlError, HardwareError, Result};
use crate::fsm::{PinState, PinStateTable};

// ───────────────────────────────────────────────────────────────
// Results
// ───────────────────────────────────────────────────────────────

/// Result of a single [`PinController::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub pin_id: PinId,
    pub device_name: String,
    pub resulting_state: DeviceState,
    /// Level driven (writes) or read (status).
    pub level: LogicLevel,
    /// Only set for `TurnOn` / `TurnOff`.
    pub message: Option<String>,
}

/// One entry per registered pin, in registry order.
pub type Snapshot = Vec<(PinId, core::result::Result<PinRecord, HardwareError>)>;

// ───────────────────────────────────────────────────────────────
// PinController
// ───────────────────────────────────────────────────────────────

struct Inner<G, S> {
    gpio: G,
    sink: S,
    states: PinStateTable,
}

/// Maps requests onto GPIO changes and back into observable state.
pub struct PinController<G, S> {
    registry: PinRegistry,
    polarity: Polarity,
    inner: Mutex<Inner<G, S>>,
}

impl<G: GpioPort, S: EventSink> PinController<G, S> {
    /// Construct the controller.  No hardware is touched until the first
    /// request; every pin starts [`PinState::Unknown`].
    pub fn new(registry: PinRegistry, polarity: Polarity, gpio: G, sink: S) -> Self {
        let states = PinStateTable::new(registry.len());
        Self {
            registry,
            polarity,
            inner: Mutex::new(Inner { gpio, sink, states }),
        }
    }

    // ── Requests ──────────────────────────────────────────────

    /// Validate `pin`, perform `action`, and report the resulting state.
    ///
    /// Unknown pins fail with [`ControlError::UnknownPin`] before any driver
    /// call.  On a driver failure the cached state is left unchanged.
    pub fn apply(&self, pin: PinId, action: Action) -> Result<ApplyOutcome> {
        let (index, entry) = self.validate(pin)?;
        let name = entry.name.as_str();
        let mut inner = self.lock();

        match action {
            Action::TurnOn => self.write(&mut inner, index, pin, name, DeviceState::On),
            Action::TurnOff => self.write(&mut inner, index, pin, name, DeviceState::Off),
            Action::Status => {
                let (level, state) = self.read(&mut inner, index, pin)?;
                Ok(ApplyOutcome {
                    pin_id: pin,
                    device_name: name.to_string(),
                    resulting_state: state,
                    level,
                    message: None,
                })
            }
        }
    }

    /// [`apply`](Self::apply) for an unparsed action string.
    ///
    /// An unrecognised action is rejected with
    /// [`ControlError::InvalidAction`] without touching hardware; callers
    /// that want the old "fall through to status" display follow up with
    /// [`snapshot_all`](Self::snapshot_all).
    pub fn apply_str(&self, pin: PinId, action: &str) -> Result<ApplyOutcome> {
        self.validate(pin)?;
        match action.parse::<Action>() {
            Ok(action) => self.apply(pin, action),
            Err(e) => {
                self.lock().sink.emit(&AppEvent::InvalidAction {
                    pin,
                    action: action.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Drive `pin` so the device ends up in `state`.
    pub fn set_state(&self, pin: PinId, state: DeviceState) -> Result<ApplyOutcome> {
        let action = match state {
            DeviceState::On => Action::TurnOn,
            DeviceState::Off => Action::TurnOff,
        };
        self.apply(pin, action)
    }

    /// Fresh hardware read of `pin`.
    pub fn get_state(&self, pin: PinId) -> Result<DeviceState> {
        self.apply(pin, Action::Status).map(|o| o.resulting_state)
    }

    /// Read every registered pin, in registry order.
    ///
    /// A failing pin does not stop the others from being read; its entry
    /// carries the [`HardwareError`].
    pub fn snapshot_all(&self) -> Snapshot {
        let mut inner = self.lock();
        self.registry
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let record = self
                    .read(&mut inner, index, entry.id)
                    .map(|(level, state)| PinRecord {
                        name: entry.name.clone(),
                        state,
                        level,
                    });
                (entry.id, record)
            })
            .collect()
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last known state of `pin` without touching hardware.
    pub fn cached_state(&self, pin: PinId) -> Result<PinState> {
        let (index, _) = self.registry.locate(pin)?;
        Ok(self.lock().states.get(index))
    }

    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Borrow the injected ports (test inspection, diagnostics).
    pub fn with_ports<R>(&self, f: impl FnOnce(&G, &S) -> R) -> R {
        let inner = self.lock();
        f(&inner.gpio, &inner.sink)
    }

    // ── Internal ──────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Inner<G, S>> {
        // The guarded state is a cache the next hardware read rewrites.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn validate(&self, pin: PinId) -> Result<(usize, &RegisteredPin)> {
        self.registry.locate(pin).inspect_err(|_| {
            self.lock().sink.emit(&AppEvent::UnknownPin(pin));
        })
    }

    fn write(
        &self,
        inner: &mut Inner<G, S>,
        index: usize,
        pin: PinId,
        name: &str,
        target: DeviceState,
    ) -> Result<ApplyOutcome> {
        let level = self.polarity.level_for(target);
        debug!("GPIO {}: driving {:?} for {}", pin, level, target);

        if let Err(e) = inner.gpio.configure_output(pin, level) {
            inner.sink.emit(&AppEvent::HardwareFault {
                pin,
                fault: e.cause.clone(),
            });
            return Err(ControlError::Hardware(e));
        }

        let from = inner.states.transition(index, target);
        inner.sink.emit(&AppEvent::Switched {
            pin,
            from,
            to: target,
        });

        Ok(ApplyOutcome {
            pin_id: pin,
            device_name: name.to_string(),
            resulting_state: target,
            level,
            message: Some(format!("Turned {name} {target}.")),
        })
    }

    fn read(
        &self,
        inner: &mut Inner<G, S>,
        index: usize,
        pin: PinId,
    ) -> core::result::Result<(LogicLevel, DeviceState), HardwareError> {
        match inner.gpio.read_level(pin) {
            Ok(level) => {
                let state = self.polarity.state_for(level);
                inner.states.transition(index, state);
                inner.sink.emit(&AppEvent::Read { pin, level, state });
                Ok((level, state))
            }
            Err(e) => {
                inner.sink.emit(&AppEvent::HardwareFault {
                    pin,
                    fault: e.cause.clone(),
                });
                Err(e)
            }
        }
    }
}
