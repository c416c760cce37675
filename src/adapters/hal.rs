//! `embedded-hal` adapter: bridges digital output pins to [`GpioPort`].
//!
//! Any pin implementing `embedded-hal` 1.0 [`StatefulOutputPin`] can sit
//! behind the controller: the simulated [`SimPin`](super::sim::SimPin),
//! an expander pin, or a board HAL's output.  Pins are already outputs,
//! so `configure_output` is a single level write.

use embedded_hal::digital::StatefulOutputPin;
use heapless::Vec;

use crate::app::model::{LogicLevel, PinId};
use crate::app::ports::GpioPort;
use crate::app::registry::MAX_PINS;
use crate::error::{HardwareError, HardwareFault, RegistryError};

/// Fixed-capacity table of `embedded-hal` pins keyed by [`PinId`].
pub struct HalGpio<P> {
    pins: Vec<(PinId, P), MAX_PINS>,
}

impl<P: StatefulOutputPin> HalGpio<P> {
    pub fn from_pins<I>(pins: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (PinId, P)>,
    {
        let mut table: Vec<(PinId, P), MAX_PINS> = Vec::new();
        for (id, pin) in pins {
            if table.iter().any(|(existing, _)| *existing == id) {
                return Err(RegistryError::DuplicatePin(id));
            }
            table.push((id, pin)).map_err(|_| RegistryError::Full {
                capacity: MAX_PINS,
            })?;
        }
        Ok(Self { pins: table })
    }

    fn pin_mut(&mut self, pin: PinId) -> Result<&mut P, HardwareError> {
        self.pins
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .map(|(_, p)| p)
            .ok_or_else(|| HardwareError::new(pin, HardwareFault::InvalidPin))
    }
}

fn fault(pin: PinId, e: impl core::fmt::Debug) -> HardwareError {
    HardwareError::new(pin, HardwareFault::Io(format!("{e:?}")))
}

impl<P: StatefulOutputPin> GpioPort for HalGpio<P> {
    fn configure_output(
        &mut self,
        pin: PinId,
        initial_level: LogicLevel,
    ) -> Result<(), HardwareError> {
        let p = self.pin_mut(pin)?;
        match initial_level {
            LogicLevel::Low => p.set_low(),
            LogicLevel::High => p.set_high(),
        }
        .map_err(|e| fault(pin, e))
    }

    fn read_level(&mut self, pin: PinId) -> Result<LogicLevel, HardwareError> {
        let p = self.pin_mut(pin)?;
        p.is_set_high().map(LogicLevel::from).map_err(|e| fault(pin, e))
    }
}
