//! Overlay query parameters.
//!
//! The dashboard server composites two overlays onto the image, each described
//! by a positional, comma-separated query parameter:
//!
//! - `textoverlay=<text>,<x>,<y>,<font size>`
//! - `batteryoverlay=<percentage>,<x>,<y>,<icon style>`
//!
//! Coordinates are pixels on the 1200x825 Inkplate 10 panel, rotated to
//! portrait.
//!
//! # Example
//!
//! ```
//! use inkdash::{BatteryOverlay, OverlayQuery, TextOverlay};
//!
//! let query = OverlayQuery::from_query_string(
//!     "textoverlay=3.8V,498,1175,16&batteryoverlay=62,540,1172,x24",
//! );
//!
//! let battery = query.battery_overlay().unwrap().unwrap();
//! assert_eq!(battery.percentage, 62);
//! assert_eq!(battery.style, "x24");
//!
//! let text = query.text_overlay().unwrap().unwrap();
//! assert_eq!(text.text, "3.8V");
//! ```

use std::fmt;

use crate::battery::voltage_label;
use crate::error::Error;

/// Query parameter carrying the text overlay
pub const TEXT_OVERLAY_PARAM: &str = "textoverlay";

/// Query parameter carrying the battery overlay
pub const BATTERY_OVERLAY_PARAM: &str = "batteryoverlay";

/// Default horizontal position of the voltage label
pub const TEXT_OVERLAY_X: u32 = 498;

/// Default vertical position of the voltage label
pub const TEXT_OVERLAY_Y: u32 = 1175;

/// Default font size of the voltage label
pub const TEXT_OVERLAY_SIZE: u32 = 16;

/// Default horizontal position of the battery icon
pub const BATTERY_OVERLAY_X: u32 = 540;

/// Default vertical position of the battery icon
pub const BATTERY_OVERLAY_Y: u32 = 1172;

/// Default battery icon style (24px)
pub const BATTERY_OVERLAY_STYLE: &str = "x24";

/// Text drawn at a fixed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOverlay {
    /// Text to draw
    pub text: String,
    /// Horizontal position in pixels
    pub x: u32,
    /// Vertical position in pixels
    pub y: u32,
    /// Font size
    pub size: u32,
}

impl TextOverlay {
    /// Create a text overlay.
    pub fn new(text: impl Into<String>, x: u32, y: u32, size: u32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
        }
    }

    /// Create a voltage label with one decimal place (e.g. "3.8V").
    pub fn voltage(voltage: f64, x: u32, y: u32, size: u32) -> Self {
        Self::new(voltage_label(voltage), x, y, size)
    }

    /// The `textoverlay` value as it appears in a query string.
    ///
    /// The text is percent-encoded; the field separators are not.
    pub fn query_value(&self) -> impl fmt::Display + '_ {
        TextQueryValue(self)
    }

    /// Parse the `textoverlay` value.
    ///
    /// The text is everything before the last three fields, so it may itself
    /// contain commas.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let mut fields = value.rsplitn(4, ',');
        let size = next_number(&mut fields, "size", value)?;
        let y = next_number(&mut fields, "y", value)?;
        let x = next_number(&mut fields, "x", value)?;
        let text = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidOverlay(format!("missing text in '{}'", value)))?;

        Ok(Self::new(text, x, y, size))
    }
}

/// Decoded wire form; use [`TextOverlay::query_value`] inside a URI.
impl fmt::Display for TextOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.text, self.x, self.y, self.size)
    }
}

/// Battery icon drawn at a fixed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryOverlay {
    /// Remaining charge (0-100)
    pub percentage: u8,
    /// Horizontal position in pixels
    pub x: u32,
    /// Vertical position in pixels
    pub y: u32,
    /// Icon style understood by the server (e.g. "x24")
    pub style: String,
}

impl BatteryOverlay {
    /// Create a battery overlay.
    pub fn new(percentage: u8, x: u32, y: u32, style: impl Into<String>) -> Self {
        Self {
            percentage,
            x,
            y,
            style: style.into(),
        }
    }

    /// Parse the `batteryoverlay` value.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let mut fields = value.splitn(4, ',');
        let percentage: u8 = next_number(&mut fields, "percentage", value)?;
        if percentage > 100 {
            return Err(Error::InvalidOverlay(format!(
                "percentage {} out of range in '{}'",
                percentage, value
            )));
        }
        let x = next_number(&mut fields, "x", value)?;
        let y = next_number(&mut fields, "y", value)?;
        let style = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidOverlay(format!("missing style in '{}'", value)))?;

        Ok(Self::new(percentage, x, y, style))
    }

    /// The `batteryoverlay` value as it appears in a query string.
    ///
    /// The style is percent-encoded; the field separators are not.
    pub fn query_value(&self) -> impl fmt::Display + '_ {
        BatteryQueryValue(self)
    }
}

/// Decoded wire form; use [`BatteryOverlay::query_value`] inside a URI.
impl fmt::Display for BatteryOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.percentage, self.x, self.y, self.style
        )
    }
}

struct TextQueryValue<'a>(&'a TextOverlay);

impl fmt::Display for TextQueryValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overlay = self.0;
        write!(
            f,
            "{},{},{},{}",
            Escaped(&overlay.text),
            overlay.x,
            overlay.y,
            overlay.size
        )
    }
}

struct BatteryQueryValue<'a>(&'a BatteryOverlay);

impl fmt::Display for BatteryQueryValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overlay = self.0;
        write!(
            f,
            "{},{},{},{}",
            overlay.percentage,
            overlay.x,
            overlay.y,
            Escaped(&overlay.style)
        )
    }
}

/// Form-urlencoded rendering of a free-text field.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in form_urlencoded::byte_serialize(self.0.as_bytes()) {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

/// Raw overlay parameters pulled from a request query string.
///
/// This is the server side of the URI: it lets a dashboard server (or a test)
/// recover what the firmware asked for.
#[derive(Debug, Clone, Default)]
pub struct OverlayQuery {
    /// Raw `textoverlay` value (if present)
    pub text: Option<String>,
    /// Raw `batteryoverlay` value (if present)
    pub battery: Option<String>,
}

impl OverlayQuery {
    /// Extract overlay parameters from a query string.
    pub fn from_query_string(query: &str) -> Self {
        let mut overlays = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                TEXT_OVERLAY_PARAM => overlays.text = Some(value.into_owned()),
                BATTERY_OVERLAY_PARAM => overlays.battery = Some(value.into_owned()),
                _ => {}
            }
        }
        overlays
    }

    /// Extract overlay parameters from a full URI.
    ///
    /// A URI without a query yields no overlays.
    pub fn from_uri(uri: &str) -> Self {
        match uri.split_once('?') {
            Some((_, query)) => Self::from_query_string(query),
            None => Self::default(),
        }
    }

    /// Parse the text overlay, if one was sent.
    pub fn text_overlay(&self) -> Result<Option<TextOverlay>, Error> {
        self.text.as_deref().map(TextOverlay::parse).transpose()
    }

    /// Parse the battery overlay, if one was sent.
    pub fn battery_overlay(&self) -> Result<Option<BatteryOverlay>, Error> {
        self.battery.as_deref().map(BatteryOverlay::parse).transpose()
    }
}

/// Parse the next positional field as a number.
fn next_number<'a, T, I>(fields: &mut I, name: &str, value: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    let field = fields
        .next()
        .ok_or_else(|| Error::InvalidOverlay(format!("missing {} in '{}'", name, value)))?;
    field
        .trim()
        .parse()
        .map_err(|_| Error::InvalidOverlay(format!("bad {} '{}' in '{}'", name, field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_overlay_display() {
        let overlay = TextOverlay::voltage(3.75, TEXT_OVERLAY_X, TEXT_OVERLAY_Y, TEXT_OVERLAY_SIZE);
        assert_eq!(overlay.to_string(), "3.8V,498,1175,16");
    }

    #[test]
    fn test_battery_overlay_display() {
        let overlay = BatteryOverlay::new(
            62,
            BATTERY_OVERLAY_X,
            BATTERY_OVERLAY_Y,
            BATTERY_OVERLAY_STYLE,
        );
        assert_eq!(overlay.to_string(), "62,540,1172,x24");
    }

    #[test]
    fn test_text_overlay_parse_with_commas() {
        let overlay = TextOverlay::parse("AQI 42, good,10,20,12").unwrap();
        assert_eq!(overlay.text, "AQI 42, good");
        assert_eq!((overlay.x, overlay.y, overlay.size), (10, 20, 12));
    }

    #[test]
    fn test_text_overlay_parse_errors() {
        assert!(TextOverlay::parse("3.8V,498,1175").is_err());
        assert!(TextOverlay::parse("3.8V,498,abc,16").is_err());
        assert!(TextOverlay::parse("").is_err());
        assert!(TextOverlay::parse(",1,2,3").is_err()); // Empty text
    }

    #[test]
    fn test_battery_overlay_parse_errors() {
        assert!(BatteryOverlay::parse("62,540,1172").is_err()); // No style
        assert!(BatteryOverlay::parse("62,540,1172,").is_err()); // Empty style
        assert!(BatteryOverlay::parse("101,540,1172,x24").is_err()); // Out of range
        assert!(BatteryOverlay::parse("-1,540,1172,x24").is_err());
        assert!(BatteryOverlay::parse("sixty,540,1172,x24").is_err());
    }

    #[test]
    fn test_query_value_leaves_plain_fields_alone() {
        let text = TextOverlay::voltage(3.75, 498, 1175, 16);
        assert_eq!(text.query_value().to_string(), "3.8V,498,1175,16");

        let battery = BatteryOverlay::new(62, 540, 1172, "x24");
        assert_eq!(battery.query_value().to_string(), "62,540,1172,x24");
    }

    #[test]
    fn test_query_value_escapes_reserved_characters() {
        let battery = BatteryOverlay::new(62, 540, 1172, "x24&debug=1");
        assert_eq!(
            battery.query_value().to_string(),
            "62,540,1172,x24%26debug%3D1"
        );

        let text = TextOverlay::new("PM2.5 #1 + 50%", 10, 20, 12);
        assert_eq!(
            text.query_value().to_string(),
            "PM2.5+%231+%2B+50%25,10,20,12"
        );
    }

    #[test]
    fn test_query_value_survives_parsing() {
        for style in ["x+24", "x24&debug=1", "x%2024", "x#24", "x 24"] {
            let overlay = BatteryOverlay::new(62, 540, 1172, style);
            let query = format!("batteryoverlay={}", overlay.query_value());
            let parsed = OverlayQuery::from_query_string(&query)
                .battery_overlay()
                .unwrap();
            assert_eq!(parsed, Some(overlay), "style {:?}", style);
        }

        let overlay = TextOverlay::new("a,b & c", 1, 2, 3);
        let query = format!("textoverlay={}", overlay.query_value());
        let parsed = OverlayQuery::from_query_string(&query)
            .text_overlay()
            .unwrap();
        assert_eq!(parsed, Some(overlay));
    }

    #[test]
    fn test_from_uri() {
        let query = OverlayQuery::from_uri(
            "http://192.168.1.10:8000/dashboard/airquality.png?textoverlay=3.8V,498,1175,16&batteryoverlay=62,540,1172,x24",
        );

        assert_eq!(query.text.as_deref(), Some("3.8V,498,1175,16"));
        assert_eq!(query.battery.as_deref(), Some("62,540,1172,x24"));
        assert_eq!(
            query.battery_overlay().unwrap(),
            Some(BatteryOverlay::new(62, 540, 1172, "x24"))
        );
    }

    #[test]
    fn test_query_without_overlays() {
        let query = OverlayQuery::from_uri("http://192.168.1.10:8000/dashboard/airquality.png");
        assert!(query.text_overlay().unwrap().is_none());
        assert!(query.battery_overlay().unwrap().is_none());

        let query = OverlayQuery::from_query_string("token=abc&other=value");
        assert!(query.text.is_none());
        assert!(query.battery.is_none());
    }

    #[test]
    fn test_query_decodes_percent_escapes() {
        let query = OverlayQuery::from_query_string("textoverlay=3.8V%2C498%2C1175%2C16");
        let text = query.text_overlay().unwrap().unwrap();
        assert_eq!(text, TextOverlay::new("3.8V", 498, 1175, 16));
    }
}
