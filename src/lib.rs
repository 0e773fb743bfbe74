//! # inkdash
//!
//! Battery estimation and dashboard image URIs for e-ink dashboard firmware.
//!
//! The firmware wakes up, samples its battery, and fetches a pre-rendered
//! dashboard image from a server on the local network. The server composites
//! the battery state onto the image, so the request URL carries it:
//!
//! ```text
//! http://192.168.1.10:8000/dashboard/airquality.png?textoverlay=3.8V,498,1175,16&batteryoverlay=62,540,1172,x24
//! ```
//!
//! This crate provides:
//! - A LiPo voltage to percentage estimate
//! - A URI builder that writes into a caller-owned fixed-capacity buffer
//! - Typed overlay parameters that render to (and parse from) the query string
//! - Optional YAML configuration for the server address and overlay positions
//!
//! ## Quick Start
//!
//! ```
//! use inkdash::{write_uri_string, UriBuffer};
//!
//! // Anything that yields volts works as a sensor, including a closure
//! let mut read_battery = || 3.75;
//!
//! let mut uri = UriBuffer::new();
//! write_uri_string(&mut read_battery, &mut uri).unwrap();
//!
//! assert_eq!(
//!     uri.as_str(),
//!     "http://192.168.1.10:8000/dashboard/airquality.png?textoverlay=3.8V,498,1175,16&batteryoverlay=62,540,1172,x24"
//! );
//! ```
//!
//! ## Query Parameters
//!
//! | Parameter | Fields | Example |
//! |-----------|--------|---------|
//! | `textoverlay` | text, x, y, font size | `3.8V,498,1175,16` |
//! | `batteryoverlay` | percentage, x, y, icon style | `62,540,1172,x24` |
//!
//! ## Feature Flags
//!
//! - `config` - Load [`DashboardConfig`] from YAML files
//! - `full` - All features

mod battery;
pub mod config;
mod error;
pub mod overlay;
mod uri;

pub use battery::{BatteryReading, BatterySensor};
pub use config::{BatteryOverlayConfig, DashboardConfig, TextOverlayConfig};
pub use error::Error;
pub use overlay::{BatteryOverlay, OverlayQuery, TextOverlay};
pub use uri::{write_uri_string, DashboardUri};

/// LiPo battery voltage at 0%
pub const BATTERY_MIN_VOLTAGE: f64 = 3.0;

/// LiPo battery voltage at 100%
pub const BATTERY_MAX_VOLTAGE: f64 = 4.2;

/// Capacity of the firmware's URI buffer in bytes
pub const URI_BUFFER_SIZE: usize = 512;

/// Dashboard server on the local network
pub const DEFAULT_SERVER_URL: &str = "http://192.168.1.10:8000";

/// Path of the dashboard image on the server
pub const DEFAULT_IMAGE_PATH: &str = "/dashboard/airquality.png";

/// Fixed-capacity buffer sized for the firmware's HTTP client.
pub type UriBuffer = heapless::String<URI_BUFFER_SIZE>;

/// Convert battery voltage (in volts) to percentage.
///
/// Linear between 3.0V (0%) and 4.2V (100%), clamped at both ends.
/// The fractional part is truncated, not rounded. NaN maps to 0.
///
/// # Example
///
/// ```
/// use inkdash::battery_percentage;
///
/// assert_eq!(battery_percentage(4.2), 100);
/// assert_eq!(battery_percentage(3.6), 50);
/// assert_eq!(battery_percentage(3.75), 62); // 62.5 truncates
/// assert_eq!(battery_percentage(3.0), 0);
/// ```
pub fn battery_percentage(voltage: f64) -> u8 {
    if voltage <= BATTERY_MIN_VOLTAGE {
        0
    } else if voltage >= BATTERY_MAX_VOLTAGE {
        100
    } else {
        // `as` truncates toward zero and sends NaN to 0
        ((voltage - BATTERY_MIN_VOLTAGE) / (BATTERY_MAX_VOLTAGE - BATTERY_MIN_VOLTAGE) * 100.0)
            as u8
    }
}
