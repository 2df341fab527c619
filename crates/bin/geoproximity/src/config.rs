//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `geoproximity.toml` in the working directory unless another path
//! is given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::Path;

use geoproximity_domain::coordinate::Coordinate;
use geoproximity_domain::distance::{Distance, DistanceModel};
use geoproximity_domain::error::GeoError;
use geoproximity_domain::geofence::{DEFAULT_GEOFENCE_RADIUS, Geofence};
use geoproximity_domain::proximity::{OFFICE_LOCATION, PROXIMITY_THRESHOLD, ProximityChecker};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference point and threshold for the proximity check.
    pub reference: ReferenceConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Named geofences reported alongside each check.
    pub geofences: Vec<GeofenceConfig>,
}

/// Reference point configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// Points strictly closer than this are near.
    pub threshold_meters: f64,
    pub model: DistanceModel,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One `[[geofences]]` entry.
#[derive(Debug, Deserialize)]
pub struct GeofenceConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,
}

fn default_radius_meters() -> f64 {
    DEFAULT_GEOFENCE_RADIUS.meters()
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting reference point, threshold or geofences are invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(threshold) = lookup("GEOPROXIMITY_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.reference.threshold_meters = threshold;
        }
        if let Some(model) = lookup("GEOPROXIMITY_MODEL").and_then(|v| v.parse().ok()) {
            self.reference.model = model;
        }
        if let Some(val) = lookup("GEOPROXIMITY_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.checker()?;
        self.geofences()?;
        Ok(())
    }

    /// Build the proximity checker described by `[reference]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an out-of-range reference point
    /// or a non-positive threshold.
    pub fn checker(&self) -> Result<ProximityChecker, ConfigError> {
        let reference = Coordinate::new(self.reference.latitude, self.reference.longitude)?;
        Ok(ProximityChecker::builder()
            .reference(reference)
            .threshold(Distance::from_meters(self.reference.threshold_meters))
            .model(self.reference.model)
            .build()?)
    }

    /// Build the configured geofences, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first geofence with an empty
    /// name, an out-of-range center or a non-positive radius.
    pub fn geofences(&self) -> Result<Vec<Geofence>, ConfigError> {
        self.geofences
            .iter()
            .map(|entry| -> Result<Geofence, ConfigError> {
                let center = Coordinate::new(entry.latitude, entry.longitude)?;
                Ok(Geofence::builder()
                    .name(entry.name.clone())
                    .center(center)
                    .radius(Distance::from_meters(entry.radius_meters))
                    .build()?)
            })
            .collect()
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            latitude: OFFICE_LOCATION.latitude(),
            longitude: OFFICE_LOCATION.longitude(),
            threshold_meters: PROXIMITY_THRESHOLD.meters(),
            model: DistanceModel::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "geoproximity=info,geoproximity_app=info,geoproximity_adapter_location_jsonl=info"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The configured values break a domain invariant.
    #[error("invalid configuration")]
    Invalid(#[from] GeoError),
}
