//! Application core: pure domain logic, zero I/O.
//!
//! The pin registry, the control protocol and the data model.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real GPIO.

pub mod commands;
pub mod events;
pub mod model;
pub mod ports;
pub mod registry;
pub mod service;
