//! Configuration loading and typed config structures for the Quakewatch
//! server.
//!
//! The configuration lives in `quakewatch.yaml` next to the binary (or at
//! the path in `QUAKE_CONFIG`). Every section and field has a default
//! equal to the stock map setup, so a missing or empty file is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use quake_types::CategorySet;
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "quakewatch.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file present; built-in defaults.
    Defaults,
}

/// An environment override whose value could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    /// The variable name.
    pub var: &'static str,
    /// The raw value it held.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

/// Top-level server configuration, mirroring `quakewatch.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuakeConfig {
    /// Listen address.
    pub server: ServerSettings,
    /// Event feed and tectonic overlay sources.
    pub feed: FeedSettings,
    /// Spatial-query service.
    pub overpass: OverpassSettings,
    /// Map, cluster and heat options served to the front-end.
    pub map: MapSettings,
    /// Log level and format.
    pub logging: LoggingSettings,
}

impl QuakeConfig {
    /// Load the configuration file named by `QUAKE_CONFIG`, or
    /// [`DEFAULT_CONFIG_PATH`], then apply environment overrides.
    ///
    /// A missing file yields defaults. The returned [`ConfigSource`] and
    /// any [`RejectedOverride`]s are handed back so the caller can log them
    /// once logging is up.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<(Self, ConfigSource, Vec<RejectedOverride>), ConfigError> {
        let path = std::env::var("QUAKE_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let (mut config, source) = if path.exists() {
            (Self::from_file(&path)?, ConfigSource::File(path))
        } else {
            (Self::default(), ConfigSource::Defaults)
        };
        let rejected = config.apply_overrides(|key| std::env::var(key).ok());
        Ok((config, source, rejected))
    }

    /// Parse configuration from a YAML file without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Blank input is the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup:
    /// - `QUAKE_HOST` overrides `server.host`
    /// - `QUAKE_PORT` overrides `server.port`
    /// - `QUAKE_FEED_URL` overrides `feed.events_url`
    /// - `QUAKE_TECTONIC_URL` overrides `feed.tectonic_url`
    /// - `OVERPASS_URL` overrides `overpass.endpoint`
    ///
    /// Values that fail to parse leave the field untouched and are returned.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<RejectedOverride>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        if let Some(val) = lookup("QUAKE_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("QUAKE_PORT") {
            match val.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => rejected.push(RejectedOverride {
                    var: "QUAKE_PORT",
                    value: val,
                }),
            }
        }
        if let Some(val) = lookup("QUAKE_FEED_URL") {
            self.feed.events_url = val;
        }
        if let Some(val) = lookup("QUAKE_TECTONIC_URL") {
            self.feed.tectonic_url = val;
        }
        if let Some(val) = lookup("OVERPASS_URL") {
            self.overpass.endpoint = val;
        }
        rejected
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// HTTP listen address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

/// Event feed and overlay sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// GeoJSON earthquake feed.
    pub events_url: String,
    /// Plate-boundary GeoJSON overlay.
    pub tectonic_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl FeedSettings {
    /// Per-request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            events_url: quake_feed::DEFAULT_EVENTS_URL.to_owned(),
            tectonic_url: quake_feed::DEFAULT_TECTONIC_URL.to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Spatial-query service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OverpassSettings {
    /// Interpreter endpoint.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Which categories a polygon query counts.
    pub categories: CategorySet,
}

impl OverpassSettings {
    /// Per-request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            endpoint: quake_overpass::DEFAULT_ENDPOINT.to_owned(),
            timeout_secs: 60,
            categories: CategorySet::default(),
        }
    }
}

/// Map view options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Initial center as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom.
    pub zoom: u8,
    /// Maximum zoom.
    pub max_zoom: u8,
    /// Zoom applied when a table row is activated.
    pub focus_zoom: u8,
    /// Marker clustering.
    pub cluster: ClusterSettings,
    /// Heat layer.
    pub heat: HeatSettings,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: [20.0, 0.0],
            zoom: 2,
            max_zoom: 18,
            focus_zoom: quake_engine::session::DEFAULT_FOCUS_ZOOM,
            cluster: ClusterSettings::default(),
            heat: HeatSettings::default(),
        }
    }
}

/// Marker-cluster options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ClusterSettings {
    /// Pixel radius within which markers merge.
    pub max_cluster_radius: u32,
    /// Zoom level from which markers are never clustered.
    pub disable_clustering_at_zoom: u8,
    /// Clicking a cluster zooms to its bounds.
    pub zoom_to_bounds_on_click: bool,
    /// Spread overlapping markers at max zoom.
    pub spiderfy_on_max_zoom: bool,
    /// Outline a cluster's extent on hover.
    pub show_coverage_on_hover: bool,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            max_cluster_radius: 15,
            disable_clustering_at_zoom: 8,
            zoom_to_bounds_on_click: true,
            spiderfy_on_max_zoom: false,
            show_coverage_on_hover: false,
        }
    }
}

/// Heat layer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatSettings {
    /// Point radius in pixels.
    pub radius: u32,
    /// Blur in pixels.
    pub blur: u32,
    /// Zoom at which points reach full intensity.
    pub max_zoom: u8,
}

impl Default for HeatSettings {
    fn default() -> Self {
        Self {
            radius: 25,
            blur: 15,
            max_zoom: 17,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            json: false,
        }
    }
}
