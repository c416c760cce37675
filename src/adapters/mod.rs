//! Adapters: concrete implementations of the hexagonal port traits, plus
//! the presentation adapters that drive the controller.
//!
//! | Adapter     | Implements / role  | Connects to                      |
//! |-------------|--------------------|----------------------------------|
//! | `bounded`   | GpioPort           | any GpioPort, on a worker thread |
//! | `cli`       | presentation       | stdout / exit code               |
//! | `hal`       | GpioPort           | embedded-hal output pins         |
//! | `http`      | presentation       | HTTP/1.1 over TCP                |
//! | `log_sink`  | EventSink          | `log` facade                     |
//! | `sim`       | embedded-hal pins  | in-memory lines                  |
//! | `sysfs`     | GpioPort           | `/sys/class/gpio`                |

pub mod bounded;
pub mod cli;
pub mod hal;
pub mod http;
pub mod log_sink;
pub mod sim;
#[cfg(feature = "sysfs")]
pub mod sysfs;
