//! Fuzz target: `parse_request` and `route`
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A parsed path always starts with `/` and carries no query string
//! - Routing a parsed path never panics
//!
//! cargo fuzz run fuzz_http_request

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinswitch::adapters::http::request::parse_request;
use pinswitch::adapters::http::routes::route;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = parse_request(data) {
        assert!(request.path.starts_with('/'));
        assert!(!request.path.contains('?'));
        let _ = route(&request.path);
    }
});
