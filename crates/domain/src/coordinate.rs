//! Coordinate — a validated latitude/longitude pair in decimal degrees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::{Distance, EARTH_MEAN_RADIUS_METERS};
use crate::error::{GeoError, ValidationError};

/// Largest valid absolute latitude, in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest valid absolute longitude, in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the Earth's surface.
///
/// Both components are finite and inside the geodetic ranges. The only way
/// to obtain one is [`Coordinate::new`] (deserialization goes through it
/// too), so every `Coordinate` in the program is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::validated(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the geodetic ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Validation`] when either component is NaN or
    /// infinite, when `latitude` is outside `[-90, 90]`, or when `longitude`
    /// is outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        Ok(Self::validated(latitude, longitude)?)
    }

    /// For compile-time constants whose values are known to be in range.
    pub(crate) const fn from_degrees_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn validated(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate);
        }
        if latitude.abs() > MAX_LATITUDE {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }
        if longitude.abs() > MAX_LONGITUDE {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }

    /// The point reached by travelling `distance` from `self` along the
    /// initial bearing `bearing_degrees` (clockwise from north) on a sphere
    /// of mean Earth radius.
    ///
    /// The result longitude is normalized into `[-180, 180]`.
    #[must_use]
    pub fn destination(self, bearing_degrees: f64, distance: Distance) -> Self {
        let angular = distance.meters() / EARTH_MEAN_RADIUS_METERS;
        let bearing = bearing_degrees.to_radians();
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let sin_lat2 = (lat1.sin() * angular.cos()
            + lat1.cos() * angular.sin() * bearing.cos())
        .clamp(-1.0, 1.0);
        let lat2 = sin_lat2.asin();
        let lon2 = lon1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * sin_lat2);

        Self {
            latitude: lat2.to_degrees().clamp(-MAX_LATITUDE, MAX_LATITUDE),
            longitude: normalize_longitude(lon2.to_degrees()),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

fn normalize_longitude(degrees: f64) -> f64 {
    let wrapped = (degrees + MAX_LONGITUDE).rem_euclid(360.0) - MAX_LONGITUDE;
    // rem_euclid maps +180 onto -180; keep the sign of the input there
    if (wrapped + MAX_LONGITUDE).abs() < f64::EPSILON && degrees > 0.0 {
        MAX_LONGITUDE
    } else {
        wrapped
    }
}
