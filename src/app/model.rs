//! Pin-state data model.
//!
//! [`LogicLevel`] is the raw electrical level on the line; [`DeviceState`]
//! is what that level means for the attached device.  The two are linked
//! only through a [`Polarity`], so the write path and the read path can
//! never disagree about which level is "on".

use core::fmt;

use serde::{Deserialize, Serialize};

/// Handle identifying a physical GPIO line.
pub type PinId = u32;

// ---------------------------------------------------------------------------
// Logic level
// ---------------------------------------------------------------------------

/// Raw electrical level read from or written to a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicLevel {
    Low,
    High,
}

impl LogicLevel {
    /// Numeric value as reported by GPIO drivers (`0` / `1`).
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }
}

impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl fmt::Display for LogicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ---------------------------------------------------------------------------
// Device state
// ---------------------------------------------------------------------------

/// Logical meaning of a level for the attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    On,
    Off,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

// ---------------------------------------------------------------------------
// Polarity
// ---------------------------------------------------------------------------

/// Wiring convention mapping [`DeviceState`] to [`LogicLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Driving the line low turns the device on.
    ActiveLow,
    /// Driving the line high turns the device on.
    ActiveHigh,
}

impl Polarity {
    /// Level to drive so the device ends up in `state`.
    pub const fn level_for(self, state: DeviceState) -> LogicLevel {
        match (self, state) {
            (Self::ActiveLow, DeviceState::On) | (Self::ActiveHigh, DeviceState::Off) => {
                LogicLevel::Low
            }
            (Self::ActiveLow, DeviceState::Off) | (Self::ActiveHigh, DeviceState::On) => {
                LogicLevel::High
            }
        }
    }

    /// Device state implied by a level read from the line.
    pub const fn state_for(self, level: LogicLevel) -> DeviceState {
        match (self, level) {
            (Self::ActiveLow, LogicLevel::Low) | (Self::ActiveHigh, LogicLevel::High) => {
                DeviceState::On
            }
            (Self::ActiveLow, LogicLevel::High) | (Self::ActiveHigh, LogicLevel::Low) => {
                DeviceState::Off
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pin record
// ---------------------------------------------------------------------------

/// Refreshed view of one registered pin.
///
/// `state` comes from the hardware read that produced this record; it is
/// never stored anywhere that could outlive the read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinRecord {
    pub name: String,
    pub state: DeviceState,
    pub level: LogicLevel,
}
