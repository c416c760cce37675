//! Fuzz target: `Action::from_str` through a live controller
//!
//! Arbitrary action strings are applied to a simulated pin. Anything that
//! is not a route keyword must be rejected without touching the line.
//!
//! cargo fuzz run fuzz_action_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinswitch::adapters::hal::HalGpio;
use pinswitch::adapters::sim::SimPin;
use pinswitch::app::model::Polarity;
use pinswitch::app::ports::NullSink;
use pinswitch::app::registry::PinRegistry;
use pinswitch::app::service::PinController;
use pinswitch::error::ControlError;

fuzz_target!(|data: &[u8]| {
    let Ok(action) = core::str::from_utf8(data) else {
        return;
    };

    let pin = SimPin::new();
    let line = pin.handle();
    let registry = PinRegistry::new([(0, "Fuzz")]).unwrap();
    let gpio = HalGpio::from_pins([(0, pin)]).unwrap();
    let controller = PinController::new(registry, Polarity::ActiveLow, gpio, NullSink);

    match controller.apply_str(0, action) {
        Ok(_) => assert!(matches!(action, "on" | "off" | "status")),
        Err(ControlError::InvalidAction(s)) => {
            assert_eq!(s, action);
            assert_eq!(line.writes(), 0);
        }
        Err(e) => panic!("unexpected error: {e}"),
    }
});
