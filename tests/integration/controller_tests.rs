//! Integration tests for the PinController → GpioPort pipeline.
//!
//! These run on the host against a call-recording mock driver and verify
//! validation, polarity, state transitions and partial-failure handling.

use crate::mock_hw::{
    GpioCall, MockGpio, calls, controller_with, events, outdoor_lights,
};

use pinswitch::app::commands::Action;
use pinswitch::app::events::AppEvent;
use pinswitch::app::model::{DeviceState, LogicLevel, PinRecord, Polarity};
use pinswitch::app::registry::PinRegistry;
use pinswitch::error::{ControlError, HardwareError, HardwareFault};
use pinswitch::fsm::PinState;

// ── Turn on / off / status ────────────────────────────────────

#[test]
fn turn_on_outdoor_lights_scenario() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);

    let out = c.apply(0, Action::TurnOn).unwrap();
    assert_eq!(out.pin_id, 0);
    assert_eq!(out.device_name, "Outdoor LED Lights");
    assert_eq!(out.resulting_state, DeviceState::On);
    assert_eq!(out.message.as_deref(), Some("Turned Outdoor LED Lights on."));

    let snapshot = c.snapshot_all();
    assert_eq!(
        snapshot,
        vec![(
            0,
            Ok(PinRecord {
                name: "Outdoor LED Lights".into(),
                state: DeviceState::On,
                level: LogicLevel::Low,
            })
        )]
    );
}

#[test]
fn turn_on_drives_low_on_active_low_wiring() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    c.apply(0, Action::TurnOn).unwrap();
    c.apply(0, Action::TurnOff).unwrap();
    assert_eq!(
        calls(&c),
        vec![
            GpioCall::Configure {
                pin: 0,
                level: LogicLevel::Low
            },
            GpioCall::Configure {
                pin: 0,
                level: LogicLevel::High
            },
        ]
    );
}

#[test]
fn turn_on_is_idempotent() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    let first = c.apply(0, Action::TurnOn).unwrap();
    let second = c.apply(0, Action::TurnOn).unwrap();
    assert_eq!(first, second);
    assert_eq!(c.get_state(0), Ok(DeviceState::On));
}

#[test]
fn turn_off_then_status_is_off() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    c.apply(0, Action::TurnOn).unwrap();
    c.apply(0, Action::TurnOff).unwrap();
    let status = c.apply(0, Action::Status).unwrap();
    assert_eq!(status.resulting_state, DeviceState::Off);
    assert_eq!(status.message, None);
}

#[test]
fn status_never_writes() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    c.apply(0, Action::Status).unwrap();
    c.snapshot_all();
    assert!(
        calls(&c)
            .iter()
            .all(|call| matches!(call, GpioCall::Read { .. }))
    );
}

#[test]
fn first_read_resolves_unknown_state() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveHigh);
    assert_eq!(c.cached_state(0), Ok(PinState::Unknown));
    // Unconfigured mock lines read high → On for active-high wiring.
    assert_eq!(c.get_state(0), Ok(DeviceState::On));
    assert_eq!(c.cached_state(0), Ok(PinState::On));
}

// ── Unknown pins ──────────────────────────────────────────────

#[test]
fn unknown_pin_fails_without_hardware_access() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    for action in [Action::TurnOn, Action::TurnOff, Action::Status] {
        assert_eq!(c.apply(5, action), Err(ControlError::UnknownPin(5)));
    }
    assert_eq!(c.apply_str(5, "on"), Err(ControlError::UnknownPin(5)));
    assert!(calls(&c).is_empty(), "no driver call may be made");
    assert!(events(&c).contains(&AppEvent::UnknownPin(5)));
}

// ── Invalid actions ───────────────────────────────────────────

#[test]
fn invalid_action_is_rejected_explicitly() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    assert_eq!(
        c.apply_str(0, "blink"),
        Err(ControlError::InvalidAction("blink".into()))
    );
    assert!(calls(&c).is_empty());
    assert!(events(&c).contains(&AppEvent::InvalidAction {
        pin: 0,
        action: "blink".into()
    }));
}

#[test]
fn apply_str_accepts_route_spellings() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    assert_eq!(c.apply_str(0, "on").unwrap().resulting_state, DeviceState::On);
    assert_eq!(c.apply_str(0, "status").unwrap().resulting_state, DeviceState::On);
    assert_eq!(c.apply_str(0, "off").unwrap().resulting_state, DeviceState::Off);
}

// ── Hardware failures ─────────────────────────────────────────

#[test]
fn failed_write_leaves_state_unchanged() {
    let c = controller_with(
        outdoor_lights(),
        MockGpio::new().fail_writes_on(0),
        Polarity::ActiveLow,
    );
    c.get_state(0).unwrap();
    assert_eq!(c.cached_state(0), Ok(PinState::Off));

    let err = c.apply(0, Action::TurnOn).unwrap_err();
    assert_eq!(
        err,
        ControlError::Hardware(HardwareError::new(0, HardwareFault::PermissionDenied))
    );
    assert_eq!(c.cached_state(0), Ok(PinState::Off));
    assert!(events(&c).contains(&AppEvent::HardwareFault {
        pin: 0,
        fault: HardwareFault::PermissionDenied
    }));
}

#[test]
fn snapshot_continues_past_failing_pin() {
    let registry = PinRegistry::new([(3, "Porch"), (1, "Garden"), (8, "Fountain")]).unwrap();
    let c = controller_with(registry, MockGpio::new().fail_reads_on(1), Polarity::ActiveLow);
    c.apply(8, Action::TurnOn).unwrap();

    let snapshot = c.snapshot_all();
    let ids: Vec<_> = snapshot.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, [3, 1, 8], "registry order must be preserved");

    assert_eq!(snapshot[0].1.as_ref().unwrap().state, DeviceState::Off);
    assert_eq!(
        snapshot[1].1,
        Err(HardwareError::new(1, HardwareFault::NotExported))
    );
    assert_eq!(snapshot[2].1.as_ref().unwrap().state, DeviceState::On);
    assert_eq!(snapshot[2].1.as_ref().unwrap().name, "Fountain");
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn switch_event_carries_previous_state() {
    let c = controller_with(outdoor_lights(), MockGpio::new(), Polarity::ActiveLow);
    c.apply(0, Action::TurnOn).unwrap();
    c.apply(0, Action::TurnOff).unwrap();
    let switches: Vec<_> = events(&c)
        .into_iter()
        .filter(|e| matches!(e, AppEvent::Switched { .. }))
        .collect();
    assert_eq!(
        switches,
        vec![
            AppEvent::Switched {
                pin: 0,
                from: PinState::Unknown,
                to: DeviceState::On
            },
            AppEvent::Switched {
                pin: 0,
                from: PinState::On,
                to: DeviceState::Off
            },
        ]
    );
}
