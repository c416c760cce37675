//! Route table and JSON views.
//!
//! | Route                | Controller call              | Body                 |
//! |----------------------|------------------------------|----------------------|
//! | `GET /`              | `snapshot_all`               | pins                 |
//! | `GET /{pin}/{action}`| `apply_str` + `snapshot_all` | message + pins       |
//!
//! An unrecognised action is answered `400` but still carries a freshly
//! read pin list, so a browser refresh shows current state.

use serde::Serialize;

use crate::app::model::{DeviceState, PinId};
use crate::app::ports::{EventSink, GpioPort};
use crate::app::registry::PinRegistry;
use crate::app::service::{PinController, Snapshot};
use crate::error::ControlError;

use super::request::Request;

// ───────────────────────────────────────────────────────────────
// Views
// ───────────────────────────────────────────────────────────────

/// One pin as shown to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinView {
    pub id: PinId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DeviceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Whole response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub pins: Vec<PinView>,
}

impl PageView {
    fn pins_from(registry: &PinRegistry, snapshot: Snapshot) -> Vec<PinView> {
        snapshot
            .into_iter()
            .map(|(id, record)| match record {
                Ok(r) => PinView {
                    id,
                    name: r.name,
                    state: Some(r.state),
                    level: Some(r.level.as_u8()),
                    error: None,
                },
                Err(e) => PinView {
                    id,
                    name: registry
                        .lookup(id)
                        .map(|p| p.name.clone())
                        .unwrap_or_default(),
                    state: None,
                    level: None,
                    error: Some(e.cause.to_string()),
                },
            })
            .collect()
    }
}

/// Status code plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: PageView,
}

impl Response {
    pub fn error(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: PageView {
                error: Some(error.into()),
                ..PageView::default()
            },
        }
    }
}

pub fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Content Too Large",
        503 => "Service Unavailable",
        _ => "Internal Server Error",
    }
}

// ───────────────────────────────────────────────────────────────
// Routing
// ───────────────────────────────────────────────────────────────

/// Where a path points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Index,
    Pin { pin: &'a str, action: &'a str },
    NotFound,
}

/// Canonical decimal pin id: digits only, no sign, no leading zeros.
pub fn parse_pin(segment: &str) -> Option<PinId> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical { segment.parse().ok() } else { None }
}

pub fn route(path: &str) -> Route<'_> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Route::Index;
    }
    let mut segments = trimmed.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(pin), Some(action), None) if !pin.is_empty() && !action.is_empty() => {
            Route::Pin { pin, action }
        }
        _ => Route::NotFound,
    }
}

/// Dispatch one request against the controller.
pub fn handle<G: GpioPort, S: EventSink>(
    controller: &PinController<G, S>,
    request: &Request,
) -> Response {
    if request.method != "GET" {
        return Response::error(405, format!("method {} not allowed", request.method));
    }

    match route(&request.path) {
        Route::Index => Response {
            status: 200,
            body: PageView {
                pins: PageView::pins_from(controller.registry(), controller.snapshot_all()),
                ..PageView::default()
            },
        },
        Route::Pin { pin, action } => {
            let Some(pin) = parse_pin(pin) else {
                return Response::error(400, format!("invalid pin id '{}'", pin));
            };
            match controller.apply_str(pin, action) {
                Ok(outcome) => with_snapshot(controller, 200, outcome.message, None),
                Err(e @ ControlError::UnknownPin(_)) => Response::error(404, e.to_string()),
                Err(e @ ControlError::InvalidAction(_)) => {
                    with_snapshot(controller, 400, None, Some(e.to_string()))
                }
                Err(e @ ControlError::Hardware(_)) => {
                    with_snapshot(controller, 503, None, Some(e.to_string()))
                }
            }
        }
        Route::NotFound => Response::error(404, format!("no route for {}", request.path)),
    }
}

fn with_snapshot<G: GpioPort, S: EventSink>(
    controller: &PinController<G, S>,
    status: u16,
    message: Option<String>,
    error: Option<String>,
) -> Response {
    Response {
        status,
        body: PageView {
            message,
            error,
            pins: PageView::pins_from(controller.registry(), controller.snapshot_all()),
        },
    }
}
