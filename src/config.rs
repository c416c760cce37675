//! System configuration parameters
//!
//! All tunable parameters for PinSwitch.  Values come from
//! [`SystemConfig::default()`] and can be overridden by a JSON file passed
//! with `--config`.  The file is read-only input; nothing is written back.

use core::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::model::{PinId, Polarity};
use crate::app::registry::{MAX_PINS, PinRegistry};
use crate::error::RegistryError;
use crate::pins;

/// One named output pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinConfig {
    pub id: PinId,
    pub name: String,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Pins ---
    /// Registered pins, in display order
    pub pins: Vec<PinConfig>,
    /// Wiring convention for every pin
    pub polarity: Polarity,
    /// Pin driven by the one-shot `on` / `off` / `status` commands
    pub cli_pin: PinId,

    // --- HTTP ---
    /// Address the HTTP adapter binds to
    pub http_bind: String,
    /// HTTP listen port
    pub http_port: u16,

    // --- Hardware ---
    /// Upper bound on a single GPIO call (milliseconds)
    pub hardware_timeout_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            pins: vec![PinConfig {
                id: pins::OUTDOOR_LIGHTS_PIN,
                name: pins::OUTDOOR_LIGHTS_NAME.to_string(),
            }],
            polarity: pins::DEFAULT_POLARITY,
            cli_pin: pins::OUTDOOR_LIGHTS_PIN,

            http_bind: "0.0.0.0".to_string(),
            http_port: pins::DEFAULT_HTTP_PORT,

            hardware_timeout_ms: 500,
        }
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(String),
    /// The config file is not valid JSON for [`SystemConfig`].
    Parse(String),
    /// A field failed validation.
    ValidationFailed(&'static str),
    /// The pin table could not be turned into a registry.
    Registry(RegistryError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Registry(e) => write!(f, "pin table: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<RegistryError> for ConfigError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl SystemConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON document; absent fields keep defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hardware_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "hardware_timeout_ms must be > 0",
            ));
        }
        if self.pins.len() > MAX_PINS {
            return Err(RegistryError::Full {
                capacity: MAX_PINS,
            }
            .into());
        }
        if !self.pins.iter().any(|p| p.id == self.cli_pin) {
            return Err(ConfigError::ValidationFailed(
                "cli_pin must be one of the configured pins",
            ));
        }
        self.registry()?;
        Ok(())
    }

    /// Build the pin registry from the pin table.
    pub fn registry(&self) -> Result<PinRegistry, ConfigError> {
        let entries = self.pins.iter().map(|p| (p.id, p.name.clone()));
        Ok(PinRegistry::new(entries)?)
    }

    pub fn hardware_timeout(&self) -> Duration {
        Duration::from_millis(self.hardware_timeout_ms)
    }
}
