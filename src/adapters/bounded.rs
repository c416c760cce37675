//! Bounded hardware calls.
//!
//! [`BoundedGpio`] moves a driver onto a dedicated worker thread and
//! forwards each [`GpioPort`] call over a channel.  The caller waits at
//! most `timeout` for the reply; a stuck bus surfaces as
//! [`HardwareFault::Timeout`] instead of blocking the request forever.
//!
//! ```text
//!  controller ──Request──▶ gpio-worker thread ──▶ driver
//!      ▲                         │
//!      └──── reply (timeout) ────┘
//! ```
//!
//! A call that times out keeps running on the worker until it completes;
//! later requests queue behind it and time out in turn.  Writes are never
//! cancelled once issued.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::{info, warn};

use crate::app::model::{LogicLevel, PinId};
use crate::app::ports::GpioPort;
use crate::error::{HardwareError, HardwareFault};

type Reply<T> = Sender<Result<T, HardwareError>>;

enum Request {
    Configure {
        pin: PinId,
        level: LogicLevel,
        reply: Reply<()>,
    },
    Read {
        pin: PinId,
        reply: Reply<LogicLevel>,
    },
}

/// [`GpioPort`] wrapper that bounds every call by a timeout.
pub struct BoundedGpio {
    tx: Sender<Request>,
    timeout: Duration,
}

impl BoundedGpio {
    /// Spawn the worker thread that owns `driver`.
    pub fn spawn<G>(driver: G, timeout: Duration) -> std::io::Result<Self>
    where
        G: GpioPort + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        std::thread::Builder::new()
            .name("gpio-worker".into())
            .spawn(move || worker(driver, &rx))?;
        info!("gpio-worker started (timeout={}ms)", timeout.as_millis());
        Ok(Self { tx, timeout })
    }

    fn call<T>(
        &self,
        pin: PinId,
        make: impl FnOnce(Reply<T>) -> Request,
    ) -> Result<T, HardwareError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(make(reply_tx))
            .map_err(|_| HardwareError::new(pin, HardwareFault::WorkerGone))?;

        match reply_rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!("GPIO {}: no reply within {:?}", pin, self.timeout);
                Err(HardwareError::new(pin, HardwareFault::Timeout))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(HardwareError::new(pin, HardwareFault::WorkerGone))
            }
        }
    }
}

fn worker<G: GpioPort>(mut driver: G, rx: &Receiver<Request>) {
    // Ends when the owning BoundedGpio is dropped.
    for request in rx {
        // A send error means the caller already gave up waiting.
        match request {
            Request::Configure { pin, level, reply } => {
                let _ = reply.send(driver.configure_output(pin, level));
            }
            Request::Read { pin, reply } => {
                let _ = reply.send(driver.read_level(pin));
            }
        }
    }
    info!("gpio-worker stopped");
}

impl GpioPort for BoundedGpio {
    fn configure_output(
        &mut self,
        pin: PinId,
        initial_level: LogicLevel,
    ) -> Result<(), HardwareError> {
        self.call(pin, |reply| Request::Configure {
            pin,
            level: initial_level,
            reply,
        })
    }

    fn read_level(&mut self, pin: PinId) -> Result<LogicLevel, HardwareError> {
        self.call(pin, |reply| Request::Read { pin, reply })
    }
}
