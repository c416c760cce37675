//! Pin registry: the static table of named pins.
//!
//! Built once at startup and passed into the controller.  Read-only after
//! construction, so it is shared between request threads without locking.
//! Iteration order is insertion order; every listing depends on it.

use heapless::Vec;

use crate::app::model::PinId;
use crate::error::{ControlError, RegistryError};

/// Maximum number of pins one registry can hold.
pub const MAX_PINS: usize = 32;

/// One named pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredPin {
    pub id: PinId,
    pub name: String,
}

/// Insertion-ordered, immutable `PinId → name` table.
#[derive(Debug, Clone)]
pub struct PinRegistry {
    pins: Vec<RegisteredPin, MAX_PINS>,
}

impl PinRegistry {
    /// Build a registry from `(id, name)` pairs, keeping their order.
    pub fn new<I, S>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (PinId, S)>,
        S: Into<String>,
    {
        let mut pins: Vec<RegisteredPin, MAX_PINS> = Vec::new();
        for (id, name) in entries {
            if pins.iter().any(|p| p.id == id) {
                return Err(RegistryError::DuplicatePin(id));
            }
            pins.push(RegisteredPin {
                id,
                name: name.into(),
            })
            .map_err(|_| RegistryError::Full {
                capacity: MAX_PINS,
            })?;
        }
        if pins.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { pins })
    }

    /// Find a pin by id.
    pub fn lookup(&self, pin: PinId) -> Result<&RegisteredPin, ControlError> {
        self.pins
            .iter()
            .find(|p| p.id == pin)
            .ok_or(ControlError::UnknownPin(pin))
    }

    /// Position of `pin` in insertion order, plus its entry.
    pub(crate) fn locate(&self, pin: PinId) -> Result<(usize, &RegisteredPin), ControlError> {
        self.pins
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == pin)
            .ok_or(ControlError::UnknownPin(pin))
    }

    /// All pin ids, in insertion order.
    pub fn all_pin_ids(&self) -> impl Iterator<Item = PinId> + '_ {
        self.pins.iter().map(|p| p.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredPin> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
