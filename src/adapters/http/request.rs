//! HTTP/1.1 request-head parsing.
//!
//! Only the request line matters to the routes; headers are read (so the
//! client is not cut off mid-send) and otherwise ignored.  Bodies are
//! never read.

use core::fmt;
use std::io::Read;

/// Upper bound on the request head (request line + headers).
pub const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// Parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path without query string.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// The peer closed before the end of the head.
    Incomplete,
    /// The head exceeds [`MAX_REQUEST_BYTES`].
    TooLarge,
    /// Not an HTTP/1.x request line.
    Malformed(&'static str),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "incomplete request"),
            Self::TooLarge => write!(f, "request head too large"),
            Self::Malformed(why) => write!(f, "malformed request: {}", why),
        }
    }
}

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parse a complete request head.
///
/// `buf` must contain the blank line that terminates the head; anything
/// after it is ignored.
pub fn parse_request(buf: &[u8]) -> Result<Request, RequestError> {
    let end = match head_end(buf) {
        Some(end) if end <= MAX_REQUEST_BYTES => end,
        Some(_) => return Err(RequestError::TooLarge),
        None if buf.len() > MAX_REQUEST_BYTES => return Err(RequestError::TooLarge),
        None => return Err(RequestError::Incomplete),
    };
    let head =
        core::str::from_utf8(&buf[..end]).map_err(|_| RequestError::Malformed("not UTF-8"))?;
    let line = head.lines().next().unwrap_or_default();

    let mut parts = line.split_ascii_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestError::Malformed("bad request line"));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(RequestError::Malformed("unsupported HTTP version"));
    }
    if !target.starts_with('/') {
        return Err(RequestError::Malformed("target must be an absolute path"));
    }

    let path = target.split(['?', '#']).next().unwrap_or(target);
    Ok(Request {
        method: method.to_string(),
        path: path.to_string(),
    })
}

/// Read a request head from `reader` and parse it.
pub fn read_request(reader: &mut impl Read) -> Result<Request, RequestError> {
    let mut buf = Vec::with_capacity(512);
    let mut chunk = [0u8; 512];
    loop {
        let n = reader.read(&mut chunk).map_err(|_| RequestError::Incomplete)?;
        if n == 0 {
            return Err(RequestError::Incomplete);
        }
        buf.extend_from_slice(&chunk[..n]);
        if head_end(&buf).is_some() {
            return parse_request(&buf);
        }
        if buf.len() > MAX_REQUEST_BYTES {
            return Err(RequestError::TooLarge);
        }
    }
}
