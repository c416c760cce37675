//! Unified error types for PinSwitch.
//!
//! The controller never lets a raw driver error escape: every adapter maps
//! its platform failure onto [`HardwareFault`], and the controller wraps it
//! with the pin id into [`HardwareError`] / [`ControlError`].  Presentation
//! adapters decide how each variant is shown (HTTP status, exit code).

use core::fmt;

use crate::app::model::PinId;

// ---------------------------------------------------------------------------
// Hardware faults
// ---------------------------------------------------------------------------

/// What went wrong at the hardware layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareFault {
    /// The pin is not exported / not configured at the OS level.
    NotExported,
    /// The process lacks permission to touch the GPIO line.
    PermissionDenied,
    /// The hardware layer does not know this pin number.
    InvalidPin,
    /// The call did not complete within the configured timeout.
    Timeout,
    /// The hardware worker thread is no longer running.
    WorkerGone,
    /// Any other I/O failure reported by the platform.
    Io(String),
}

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotExported => write!(f, "pin not exported"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::InvalidPin => write!(f, "invalid pin number"),
            Self::Timeout => write!(f, "hardware call timed out"),
            Self::WorkerGone => write!(f, "hardware worker stopped"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl From<std::io::Error> for HardwareFault {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotExported,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            std::io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Io(e.to_string()),
        }
    }
}

/// A hardware access failure for a single pin.
///
/// Never retried automatically; fatal for the request, not the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareError {
    pub pin: PinId,
    pub cause: HardwareFault,
}

impl HardwareError {
    pub fn new(pin: PinId, cause: impl Into<HardwareFault>) -> Self {
        Self {
            pin,
            cause: cause.into(),
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO {}: {}", self.pin, self.cause)
    }
}

impl std::error::Error for HardwareError {}

// ---------------------------------------------------------------------------
// Controller errors
// ---------------------------------------------------------------------------

/// Every failure a presentation adapter can receive from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The pin id is not in the registry.  No hardware was touched.
    UnknownPin(PinId),
    /// The requested action string is not `on`, `off` or `status`.
    InvalidAction(String),
    /// The driver failed.
    Hardware(HardwareError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPin(pin) => write!(f, "unknown pin {pin}"),
            Self::InvalidAction(action) => write!(f, "invalid action '{action}'"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
        }
    }
}

impl std::error::Error for ControlError {}

impl From<HardwareError> for ControlError {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

/// Errors raised while building the pin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The same pin id was registered twice.
    DuplicatePin(PinId),
    /// More pins than the registry can hold.
    Full { capacity: usize },
    /// No pins were registered.
    Empty,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePin(pin) => write!(f, "pin {pin} registered twice"),
            Self::Full { capacity } => write!(f, "more than {capacity} pins configured"),
            Self::Empty => write!(f, "no pins configured"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Library-wide `Result` alias for controller operations.
pub type Result<T> = core::result::Result<T, ControlError>;
