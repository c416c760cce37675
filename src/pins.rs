//! Default pin assignment.
//!
//! Single source of truth for the out-of-the-box wiring: one active-low
//! line driving the outdoor lights.  Override through the config file.

use crate::app::model::{PinId, Polarity};

/// GPIO line driving the outdoor LED lights relay.
pub const OUTDOOR_LIGHTS_PIN: PinId = 0;

/// Display name for [`OUTDOOR_LIGHTS_PIN`].
pub const OUTDOOR_LIGHTS_NAME: &str = "Outdoor LED Lights";

/// Wiring convention shared by every read and write path.
///
/// Historically the web route drove low for "on" while one of the
/// one-shot scripts wrote high for "on" and still reported a read of `0`
/// as "on".  Only active-low is consistent with the relay board and the
/// web route, so both surfaces now use this single constant.
pub const DEFAULT_POLARITY: Polarity = Polarity::ActiveLow;

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;
