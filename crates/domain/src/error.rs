//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`GeoError`]
//! via `#[from]`.

/// Top-level domain error.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// A value broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A location source failed to produce a reading.
    #[error("location source error")]
    LocationSource(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Latitude outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Latitude or longitude is NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFiniteCoordinate,

    /// Geofence radius is not a finite positive number of meters.
    #[error("radius {0} m must be finite and positive")]
    InvalidRadius(f64),

    /// Proximity threshold is not a finite positive number of meters.
    #[error("threshold {0} m must be finite and positive")]
    InvalidThreshold(f64),

    /// Accuracy radius is negative, NaN or infinite.
    #[error("accuracy {0} m must be finite and not negative")]
    InvalidAccuracy(f64),

    /// A required name was empty.
    #[error("name must not be empty")]
    EmptyName,
}
