//! HTTP adapter tests: a real listener on an ephemeral port, driven with
//! plain `TcpStream` requests, backed by simulated pins.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;

use pinswitch::adapters::hal::HalGpio;
use pinswitch::adapters::http::HttpServer;
use pinswitch::adapters::sim::{SimHandle, SimPin};
use pinswitch::app::model::Polarity;
use pinswitch::app::ports::NullSink;
use pinswitch::app::registry::PinRegistry;
use pinswitch::app::service::PinController;
use serde_json::Value;

fn start(pins: &[(u32, &str)]) -> (SocketAddr, Vec<SimHandle>) {
    start_with_cap(pins, pinswitch::adapters::http::MAX_CONNECTIONS)
}

fn start_with_cap(pins: &[(u32, &str)], cap: usize) -> (SocketAddr, Vec<SimHandle>) {
    let registry = PinRegistry::new(pins.iter().map(|(id, name)| (*id, *name))).unwrap();
    let sims: Vec<_> = pins.iter().map(|(id, _)| (*id, SimPin::new())).collect();
    let handles = sims.iter().map(|(_, p)| p.handle()).collect();
    let gpio = HalGpio::from_pins(sims).unwrap();
    let controller = Arc::new(PinController::new(
        registry,
        Polarity::ActiveLow,
        gpio,
        NullSink,
    ));

    let server = HttpServer::bind("127.0.0.1:0")
        .unwrap()
        .with_max_connections(cap);
    let addr = server.local_addr().unwrap();
    std::thread::spawn(move || server.serve(controller));
    (addr, handles)
}

fn raw(addr: SocketAddr, request: &[u8]) -> (u16, Value) {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(request).unwrap();
    let mut bytes = Vec::new();
    // A refused connection may end in a reset after the response arrives.
    let _ = stream.read_to_end(&mut bytes);
    let response = String::from_utf8(bytes).unwrap();

    let status: u16 = response[9..12].parse().unwrap();
    let body = response.split("\r\n\r\n").nth(1).unwrap_or_default();
    (status, serde_json::from_str(body).unwrap())
}

fn get(addr: SocketAddr, path: &str) -> (u16, Value) {
    raw(
        addr,
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n").as_bytes(),
    )
}

#[test]
fn index_lists_pins_without_message() {
    let (addr, _) = start(&[(0, "Outdoor LED Lights")]);
    let (status, body) = get(addr, "/");
    assert_eq!(status, 200);
    assert!(body.get("message").is_none());
    assert_eq!(body["pins"][0]["id"], 0);
    assert_eq!(body["pins"][0]["name"], "Outdoor LED Lights");
    assert_eq!(body["pins"][0]["state"], "off");
    assert_eq!(body["pins"][0]["level"], 1);
}

#[test]
fn on_route_switches_and_renders_message() {
    let (addr, lines) = start(&[(0, "Outdoor LED Lights")]);
    let (status, body) = get(addr, "/0/on");
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Turned Outdoor LED Lights on.");
    assert_eq!(body["pins"][0]["state"], "on");
    assert!(!lines[0].is_high(), "active-low: on drives the line low");

    let (_, body) = get(addr, "/0/off");
    assert_eq!(body["message"], "Turned Outdoor LED Lights off.");
    assert!(lines[0].is_high());
}

#[test]
fn unknown_pin_is_404_not_a_crash() {
    let (addr, lines) = start(&[(0, "Outdoor LED Lights")]);
    let (status, body) = get(addr, "/5/on");
    assert_eq!(status, 404);
    assert_eq!(body["error"], "unknown pin 5");
    assert_eq!(lines[0].writes(), 0);

    // Server still alive.
    assert_eq!(get(addr, "/").0, 200);
}

#[test]
fn non_integer_pin_is_400() {
    let (addr, _) = start(&[(0, "Outdoor LED Lights")]);
    let (status, body) = get(addr, "/lights/on");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "invalid pin id 'lights'");

    for alias in ["+0", "00", "007"] {
        let (status, _) = get(addr, &format!("/{alias}/on"));
        assert_eq!(status, 400, "/{alias}/on must not alias a registered pin");
    }
}

#[test]
fn invalid_action_is_400_with_refreshed_pins() {
    let (addr, lines) = start(&[(0, "Outdoor LED Lights")]);
    lines[0].set_high(false);
    let (status, body) = get(addr, "/0/toggle");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "invalid action 'toggle'");
    assert_eq!(body["pins"][0]["state"], "on");
    assert_eq!(lines[0].writes(), 0);
}

#[test]
fn hardware_failure_is_503_and_other_pins_still_listed() {
    let (addr, lines) = start(&[(0, "Porch"), (1, "Garden")]);
    lines[0].fail_writes(true);
    lines[0].fail_reads(true);

    let (status, body) = get(addr, "/0/on");
    assert_eq!(status, 503);
    assert!(body["error"].as_str().unwrap().starts_with("hardware: GPIO 0"));
    assert_eq!(body["pins"][0]["name"], "Porch");
    assert!(body["pins"][0].get("state").is_none());
    assert!(body["pins"][0]["error"].is_string());
    assert_eq!(body["pins"][1]["state"], "off");
}

#[test]
fn status_route_reads_without_message() {
    let (addr, lines) = start(&[(0, "Outdoor LED Lights")]);
    let (status, body) = get(addr, "/0/status");
    assert_eq!(status, 200);
    assert!(body.get("message").is_none());
    assert_eq!(lines[0].writes(), 0);
}

#[test]
fn bad_method_path_and_request_line() {
    let (addr, _) = start(&[(0, "Outdoor LED Lights")]);
    assert_eq!(
        raw(addr, b"POST /0/on HTTP/1.1\r\nContent-Length: 0\r\n\r\n").0,
        405
    );
    assert_eq!(get(addr, "/0/on/now").0, 404);
    assert_eq!(raw(addr, b"garbage\r\n\r\n").0, 400);
}

#[test]
fn concurrent_requests_are_serialised() {
    let (addr, lines) = start(&[(0, "Outdoor LED Lights")]);
    let workers: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let path = if i % 2 == 0 { "/0/on" } else { "/0/off" };
                get(addr, path).0
            })
        })
        .collect();
    for w in workers {
        assert_eq!(w.join().unwrap(), 200);
    }
    assert_eq!(lines[0].writes(), 8);

    // Whatever won last, the listing agrees with the line.
    let (_, body) = get(addr, "/");
    let expected = if lines[0].is_high() { "off" } else { "on" };
    assert_eq!(body["pins"][0]["state"], expected);
}

#[test]
fn connections_past_the_cap_get_503() {
    let (addr, lines) = start_with_cap(&[(0, "Outdoor LED Lights")], 1);

    // Holds the only slot: connected, head never sent.
    let idle = TcpStream::connect(addr).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(100));

    let (status, body) = get(addr, "/0/on");
    assert_eq!(status, 503);
    assert_eq!(body["error"], "server busy");
    assert_eq!(lines[0].writes(), 0, "refused request must not reach the pins");

    drop(idle);
    std::thread::sleep(std::time::Duration::from_millis(100));
    assert_eq!(get(addr, "/0/on").0, 200);
}
