//! Linux sysfs GPIO driver.
//!
//! Talks to `/sys/class/gpio` through the `sysfs_gpio` crate.  A pin is
//! exported the first time it is touched and stays exported for the life
//! of the process; direction and level survive a restart at the kernel
//! level, nothing else is persisted.
//!
//! `configure_output` writes `high` / `low` to the `direction` attribute,
//! which the kernel applies as "output, initially at this level" in one
//! step, so the line never floats between the two.

use std::time::Duration;

use log::{debug, info};
use sysfs_gpio::{Direction, Pin};

use crate::app::model::{LogicLevel, PinId};
use crate::app::ports::GpioPort;
use crate::error::{HardwareError, HardwareFault};

/// Time udev gets to fix permissions on a freshly exported pin.
const EXPORT_SETTLE: Duration = Duration::from_millis(100);

fn fault(e: sysfs_gpio::Error) -> HardwareFault {
    match e {
        sysfs_gpio::Error::Io(io) => HardwareFault::from(io),
        sysfs_gpio::Error::InvalidPath(_) => HardwareFault::InvalidPin,
        other => HardwareFault::Io(other.to_string()),
    }
}

/// sysfs-backed [`GpioPort`].
#[derive(Debug, Default)]
pub struct SysfsGpio {
    exported: Vec<PinId>,
}

impl SysfsGpio {
    pub fn new() -> Self {
        Self::default()
    }

    fn pin(&mut self, pin: PinId) -> Result<Pin, HardwareError> {
        let handle = Pin::new(u64::from(pin));
        if self.exported.contains(&pin) {
            return Ok(handle);
        }
        if !handle.is_exported() {
            info!("sysfs: exporting GPIO {}", pin);
            handle
                .export()
                .map_err(|e| HardwareError::new(pin, fault(e)))?;
            std::thread::sleep(EXPORT_SETTLE);
        }
        self.exported.push(pin);
        Ok(handle)
    }
}

impl GpioPort for SysfsGpio {
    fn configure_output(
        &mut self,
        pin: PinId,
        initial_level: LogicLevel,
    ) -> Result<(), HardwareError> {
        let handle = self.pin(pin)?;
        let direction = match initial_level {
            LogicLevel::Low => Direction::Low,
            LogicLevel::High => Direction::High,
        };
        debug!("sysfs: GPIO {} direction={:?}", pin, direction);
        handle
            .set_direction(direction)
            .map_err(|e| HardwareError::new(pin, fault(e)))
    }

    fn read_level(&mut self, pin: PinId) -> Result<LogicLevel, HardwareError> {
        let handle = self.pin(pin)?;
        let value = handle
            .get_value()
            .map_err(|e| HardwareError::new(pin, fault(e)))?;
        Ok(LogicLevel::from(value != 0))
    }
}
