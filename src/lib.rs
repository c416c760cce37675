//! PinSwitch library.
//!
//! Exposes named GPIO output pins as switches.  The binary wires these
//! modules to an HTTP listener and a one-shot CLI; everything here is
//! usable (and tested) without GPIO hardware.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
