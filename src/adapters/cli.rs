//! One-shot command-line adapter.
//!
//! Drives the single configured pin (`cli_pin`) and prints the result.
//! Reads and writes go through the same controller and polarity as the
//! HTTP routes, so `status` always agrees with what `on` / `off` drove.

use std::io::Write;

use anyhow::{Context, Result, bail};

use crate::app::commands::Action;
use crate::app::model::{DeviceState, PinId};
use crate::app::ports::{EventSink, GpioPort};
use crate::app::service::PinController;

/// A one-shot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneShot {
    On,
    Off,
    Status,
    /// Status of every registered pin.
    StatusAll,
}

/// Execute `command` against `pin` and print to `out`.
///
/// Hardware and lookup failures are returned, so the binary exits
/// non-zero with the message on stderr.
pub fn run<G: GpioPort, S: EventSink>(
    controller: &PinController<G, S>,
    pin: PinId,
    command: OneShot,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        OneShot::On | OneShot::Off => {
            let action = if command == OneShot::On {
                Action::TurnOn
            } else {
                Action::TurnOff
            };
            writeln!(out, "Turning the lights {}", action)?;
            let outcome = controller
                .apply(pin, action)
                .with_context(|| format!("failed to turn GPIO {} {}", pin, action))?;
            if let Some(message) = outcome.message {
                writeln!(out, "{}", message)?;
            }
        }
        OneShot::Status => {
            let outcome = controller
                .apply(pin, Action::Status)
                .with_context(|| format!("failed to read GPIO {}", pin))?;
            writeln!(out, "{}", outcome.level)?;
            writeln!(out, "{}", interpretation(outcome.resulting_state))?;
        }
        OneShot::StatusAll => {
            let mut failed = 0usize;
            for (id, record) in controller.snapshot_all() {
                match record {
                    Ok(r) => writeln!(out, "{} {}: {} (level {})", id, r.name, r.state, r.level)?,
                    Err(e) => {
                        failed += 1;
                        writeln!(out, "{} error: {}", id, e.cause)?;
                    }
                }
            }
            if failed > 0 {
                bail!("{} pin(s) could not be read", failed);
            }
        }
    }
    Ok(())
}

fn interpretation(state: DeviceState) -> &'static str {
    match state {
        DeviceState::On => "The lights should be on",
        DeviceState::Off => "The lights should be off",
    }
}
