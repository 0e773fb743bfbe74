//! Dashboard server and overlay placement configuration.
//!
//! Every field has a default matching the stock firmware, so a config file
//! only needs to name what differs.
//!
//! # Example Config (YAML)
//!
//! ```yaml
//! server_url: "http://dashboard.local:8000"
//! image_path: "/dashboard/weather.png"
//!
//! text_overlay:
//!   x: 498
//!   y: 1175
//!   size: 16
//!
//! battery_overlay:
//!   style: "x32"
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use inkdash::{DashboardConfig, DashboardUri};
//!
//! let config = DashboardConfig::load("config/dashboard.yaml")?.with_env_overrides();
//! let uri = DashboardUri::from_config(&config);
//! ```

use serde::Deserialize;

use crate::overlay::{
    BATTERY_OVERLAY_STYLE, BATTERY_OVERLAY_X, BATTERY_OVERLAY_Y, TEXT_OVERLAY_SIZE,
    TEXT_OVERLAY_X, TEXT_OVERLAY_Y,
};
use crate::{DEFAULT_IMAGE_PATH, DEFAULT_SERVER_URL};

/// Environment variable overriding [`DashboardConfig::server_url`].
pub const SERVER_URL_ENV: &str = "INKDASH_SERVER_URL";

/// Where to fetch the dashboard and where the server should draw overlays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Scheme, host and port of the dashboard server (no trailing slash)
    pub server_url: String,
    /// Path of the dashboard image (leading slash)
    pub image_path: String,
    /// Voltage label placement
    pub text_overlay: TextOverlayConfig,
    /// Battery icon placement
    pub battery_overlay: BatteryOverlayConfig,
}

/// Placement of the voltage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextOverlayConfig {
    /// Horizontal position in pixels
    pub x: u32,
    /// Vertical position in pixels
    pub y: u32,
    /// Font size
    pub size: u32,
}

/// Placement of the battery icon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatteryOverlayConfig {
    /// Horizontal position in pixels
    pub x: u32,
    /// Vertical position in pixels
    pub y: u32,
    /// Icon style understood by the server
    pub style: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
            text_overlay: TextOverlayConfig::default(),
            battery_overlay: BatteryOverlayConfig::default(),
        }
    }
}

impl Default for TextOverlayConfig {
    fn default() -> Self {
        Self {
            x: TEXT_OVERLAY_X,
            y: TEXT_OVERLAY_Y,
            size: TEXT_OVERLAY_SIZE,
        }
    }
}

impl Default for BatteryOverlayConfig {
    fn default() -> Self {
        Self {
            x: BATTERY_OVERLAY_X,
            y: BATTERY_OVERLAY_Y,
            style: BATTERY_OVERLAY_STYLE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Set the dashboard server URL.
    #[must_use]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set the dashboard image path.
    #[must_use]
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = path.into();
        self
    }

    /// Replace the server URL with `INKDASH_SERVER_URL` if it is set.
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_server_url_override(std::env::var(SERVER_URL_ENV).ok())
    }

    /// Apply the value of `INKDASH_SERVER_URL` (`None` when unset).
    fn with_server_url_override(self, value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => {
                tracing::info!("Using dashboard server from {}: {}", SERVER_URL_ENV, url);
                self.with_server_url(url.trim())
            }
            Some(_) => {
                tracing::warn!("{} is set but empty, ignoring", SERVER_URL_ENV);
                self
            }
            None => self,
        }
    }
}

#[cfg(feature = "config")]
mod yaml {
    use std::path::Path;

    use super::DashboardConfig;
    use crate::Error;

    impl DashboardConfig {
        /// Load configuration from a YAML file.
        ///
        /// # Example
        ///
        /// ```rust,ignore
        /// let config = DashboardConfig::load("config/dashboard.yaml")?;
        /// ```
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
            let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
                Error::Io(format!(
                    "Failed to read config file '{}': {}",
                    path.as_ref().display(),
                    e
                ))
            })?;
            let config = Self::from_yaml(&content)?;
            tracing::info!(
                "Loaded dashboard config from {}: {}{}",
                path.as_ref().display(),
                config.server_url,
                config.image_path
            );
            Ok(config)
        }

        /// Parse configuration from a YAML string.
        ///
        /// Missing fields take their defaults.
        pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
            serde_yaml::from_str(yaml)
                .map_err(|e| Error::Config(format!("Invalid dashboard YAML: {}", e)))
        }
    }
}
