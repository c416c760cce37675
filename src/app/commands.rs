//! Inbound actions requested by presentation adapters.
//!
//! The HTTP route and the CLI both hand the controller a string; parsing
//! happens here so that both surfaces reject the same inputs.

use core::fmt;
use core::str::FromStr;

use crate::error::ControlError;

/// Action a caller can request on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Drive the pin to the level that turns the device on.
    TurnOn,
    /// Drive the pin to the level that turns the device off.
    TurnOff,
    /// Read the pin; never changes direction or level.
    Status,
}

impl Action {
    /// Canonical route / CLI spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnOn => "on",
            Self::TurnOff => "off",
            Self::Status => "status",
        }
    }
}

impl FromStr for Action {
    type Err = ControlError;

    /// Unknown strings are an explicit [`ControlError::InvalidAction`]
    /// rather than an implicit status request.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::TurnOn),
            "off" => Ok(Self::TurnOff),
            "status" => Ok(Self::Status),
            other => Err(ControlError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
