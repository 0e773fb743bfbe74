//! Dashboard image URI construction.

use std::fmt::{self, Write};

use crate::battery::{BatteryReading, BatterySensor};
use crate::config::DashboardConfig;
use crate::error::Error;
use crate::overlay::{BatteryOverlay, TextOverlay, BATTERY_OVERLAY_PARAM, TEXT_OVERLAY_PARAM};

/// Builds the image URI the firmware requests on each wake-up.
///
/// The default builder targets the stock server and overlay positions.
///
/// # Example
///
/// ```
/// use inkdash::{DashboardConfig, DashboardUri};
///
/// let uri = DashboardUri::from_config(
///     &DashboardConfig::default().with_server_url("http://localhost:8000"),
/// );
///
/// assert_eq!(
///     uri.format_voltage(4.2),
///     "http://localhost:8000/dashboard/airquality.png?textoverlay=4.2V,498,1175,16&batteryoverlay=100,540,1172,x24"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardUri {
    config: DashboardConfig,
}

impl DashboardUri {
    /// Create a builder for the stock dashboard server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from configuration.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Get the configuration in use.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The voltage label for a reading.
    pub fn text_overlay(&self, reading: &BatteryReading) -> TextOverlay {
        let placement = &self.config.text_overlay;
        TextOverlay::voltage(reading.voltage, placement.x, placement.y, placement.size)
    }

    /// The battery icon for a reading.
    pub fn battery_overlay(&self, reading: &BatteryReading) -> BatteryOverlay {
        let placement = &self.config.battery_overlay;
        BatteryOverlay::new(
            reading.percentage,
            placement.x,
            placement.y,
            placement.style.as_str(),
        )
    }

    /// Write the URI for a reading into a fixed-capacity buffer.
    ///
    /// Any previous contents of `buf` are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if the URI does not fit. The buffer is
    /// left empty in that case, never truncated.
    pub fn write_reading<const N: usize>(
        &self,
        reading: &BatteryReading,
        buf: &mut heapless::String<N>,
    ) -> Result<(), Error> {
        buf.clear();

        if write!(buf, "{}", self.display(reading)).is_err() {
            buf.clear();
            tracing::warn!("Dashboard URI does not fit in {} bytes", N);
            return Err(Error::BufferTooSmall { capacity: N });
        }

        tracing::debug!("Dashboard URI: {}", buf.as_str());
        Ok(())
    }

    /// Write the URI for a known voltage into a fixed-capacity buffer.
    pub fn write_voltage<const N: usize>(
        &self,
        voltage: f64,
        buf: &mut heapless::String<N>,
    ) -> Result<(), Error> {
        self.write_reading(&BatteryReading::from_voltage(voltage), buf)
    }

    /// Sample the sensor once and write the URI for that sample.
    ///
    /// Returns the sample so the caller can reuse it (e.g. for logging).
    pub fn write_from_sensor<S, const N: usize>(
        &self,
        sensor: &mut S,
        buf: &mut heapless::String<N>,
    ) -> Result<BatteryReading, Error>
    where
        S: BatterySensor + ?Sized,
    {
        let reading = BatteryReading::sample(sensor);
        self.write_reading(&reading, buf)?;
        Ok(reading)
    }

    /// Format the URI for a reading on the heap.
    pub fn format_reading(&self, reading: &BatteryReading) -> String {
        self.display(reading).to_string()
    }

    /// The URI for a reading, rendered lazily.
    ///
    /// Overlay text and style are percent-encoded so they cannot break out of
    /// their query parameter.
    pub fn display<'a>(&'a self, reading: &'a BatteryReading) -> impl fmt::Display + 'a {
        UriDisplay {
            uri: self,
            reading,
        }
    }

    /// Format the URI for a known voltage on the heap.
    pub fn format_voltage(&self, voltage: f64) -> String {
        self.format_reading(&BatteryReading::from_voltage(voltage))
    }
}

struct UriDisplay<'a> {
    uri: &'a DashboardUri,
    reading: &'a BatteryReading,
}

impl fmt::Display for UriDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = &self.uri.config;
        write!(
            f,
            "{}{}?{}={}&{}={}",
            config.server_url,
            config.image_path,
            TEXT_OVERLAY_PARAM,
            self.uri.text_overlay(self.reading).query_value(),
            BATTERY_OVERLAY_PARAM,
            self.uri.battery_overlay(self.reading).query_value(),
        )
    }
}

/// Sample the battery and write the stock dashboard URI into `buf`.
///
/// Equivalent to [`DashboardUri::default()`] followed by
/// [`DashboardUri::write_from_sensor`].
///
/// # Example
///
/// ```
/// use inkdash::{write_uri_string, UriBuffer};
///
/// let mut uri = UriBuffer::new();
/// let reading = write_uri_string(&mut || 3.6, &mut uri).unwrap();
///
/// assert_eq!(reading.percentage, 50);
/// assert!(uri.ends_with("batteryoverlay=50,540,1172,x24"));
/// ```
pub fn write_uri_string<S, const N: usize>(
    sensor: &mut S,
    buf: &mut heapless::String<N>,
) -> Result<BatteryReading, Error>
where
    S: BatterySensor + ?Sized,
{
    DashboardUri::default().write_from_sensor(sensor, buf)
}
