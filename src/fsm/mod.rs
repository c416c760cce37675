//! Per-pin state machine.
//!
//! ```text
//!            ┌──────── write/read ok ────────┐
//!            │                               ▼
//!   ┌─────────┐                    ┌────────────────┐
//!   │ Unknown │                    │   On  ◀──▶ Off │
//!   └─────────┘                    └────────────────┘
//!                  driver error: stay where you are
//! ```
//!
//! Every pin starts in [`PinState::Unknown`].  A successful hardware write
//! or read moves it to `On` / `Off`; a failed one leaves it untouched.  The
//! table is only a cache of the last hardware result, never a source of
//! truth: status requests always go back to the hardware.

use log::debug;

use crate::app::model::DeviceState;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Cached state of one pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PinState {
    /// No successful hardware access yet.
    #[default]
    Unknown,
    On,
    Off,
}

impl From<DeviceState> for PinState {
    fn from(state: DeviceState) -> Self {
        match state {
            DeviceState::On => Self::On,
            DeviceState::Off => Self::Off,
        }
    }
}

// ---------------------------------------------------------------------------
// State table
// ---------------------------------------------------------------------------

/// One [`PinState`] per registry slot, indexed by registry position.
#[derive(Debug, Clone)]
pub struct PinStateTable {
    states: Vec<PinState>,
}

impl PinStateTable {
    /// `len` pins, all `Unknown`.
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![PinState::Unknown; len],
        }
    }

    /// Current cached state of the pin at `index`.
    pub fn get(&self, index: usize) -> PinState {
        self.states.get(index).copied().unwrap_or_default()
    }

    /// Record a successful hardware result; returns the previous state.
    pub fn transition(&mut self, index: usize, to: DeviceState) -> PinState {
        let Some(slot) = self.states.get_mut(index) else {
            return PinState::Unknown;
        };
        let from = *slot;
        *slot = to.into();
        if from != *slot {
            debug!("pin slot {}: {:?} -> {:?}", index, from, *slot);
        }
        from
    }
}
