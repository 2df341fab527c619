//! Geofence — a named circular region around a center coordinate.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::distance::{Distance, DistanceModel};
use crate::error::{GeoError, ValidationError};
use crate::id::GeofenceId;

/// Radius given to a geofence when none is specified.
pub const DEFAULT_GEOFENCE_RADIUS: Distance = Distance::from_meters(100.0);

/// A circular region. A point is inside when its distance to `center` is
/// strictly less than `radius`.
///
/// Deserialization runs [`Geofence::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeofence")]
pub struct Geofence {
    pub id: GeofenceId,
    pub name: String,
    pub center: Coordinate,
    pub radius: Distance,
}

#[derive(Deserialize)]
struct RawGeofence {
    #[serde(default)]
    id: GeofenceId,
    name: String,
    center: Coordinate,
    #[serde(default = "default_radius")]
    radius: Distance,
}

fn default_radius() -> Distance {
    DEFAULT_GEOFENCE_RADIUS
}

impl TryFrom<RawGeofence> for Geofence {
    type Error = GeoError;

    fn try_from(raw: RawGeofence) -> Result<Self, Self::Error> {
        let geofence = Self {
            id: raw.id,
            name: raw.name,
            center: raw.center,
            radius: raw.radius,
        };
        geofence.validate()?;
        Ok(geofence)
    }
}

impl Geofence {
    /// Create a builder for constructing a [`Geofence`].
    #[must_use]
    pub fn builder() -> GeofenceBuilder {
        GeofenceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Validation`] when `name` is empty or `radius` is
    /// not a finite positive length.
    pub fn validate(&self) -> Result<(), GeoError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !self.radius.is_positive_finite() {
            return Err(ValidationError::InvalidRadius(self.radius.meters()).into());
        }
        Ok(())
    }

    /// Whether `point` lies inside this geofence.
    #[must_use]
    pub fn contains(&self, point: Coordinate, model: DistanceModel) -> bool {
        model.distance(self.center, point) < self.radius
    }
}

/// Step-by-step builder for [`Geofence`].
#[derive(Debug, Default)]
pub struct GeofenceBuilder {
    id: Option<GeofenceId>,
    name: Option<String>,
    center: Option<Coordinate>,
    radius: Option<Distance>,
}

impl GeofenceBuilder {
    #[must_use]
    pub fn id(mut self, id: GeofenceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn center(mut self, center: Coordinate) -> Self {
        self.center = Some(center);
        self
    }

    #[must_use]
    pub fn radius(mut self, radius: Distance) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Consume the builder, validate, and return a [`Geofence`].
    ///
    /// The center defaults to the office reference location and the radius
    /// to [`DEFAULT_GEOFENCE_RADIUS`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Validation`] if `name` is missing or empty, or if
    /// the radius is not finite and positive.
    pub fn build(self) -> Result<Geofence, GeoError> {
        let geofence = Geofence {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            center: self.center.unwrap_or(crate::proximity::OFFICE_LOCATION),
            radius: self.radius.unwrap_or(DEFAULT_GEOFENCE_RADIUS),
        };
        geofence.validate()?;
        Ok(geofence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::OFFICE_LOCATION;

    #[test]
    fn should_build_with_default_radius() {
        let fence = Geofence::builder().name("office").build().unwrap();
        assert_eq!(fence.radius, DEFAULT_GEOFENCE_RADIUS);
        assert!((fence.radius.meters() - 100.0).abs() < f64::EPSILON);
        assert_eq!(fence.center, OFFICE_LOCATION);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Geofence::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(GeoError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_non_positive_radius() {
        for meters in [0.0, -5.0, f64::INFINITY] {
            let result = Geofence::builder()
                .name("office")
                .radius(Distance::from_meters(meters))
                .build();
            assert!(matches!(
                result,
                Err(GeoError::Validation(ValidationError::InvalidRadius(_)))
            ));
        }
    }

    #[test]
    fn should_contain_center_and_nearby_points() {
        let fence = Geofence::builder().name("office").build().unwrap();
        let inside = OFFICE_LOCATION.destination(90.0, Distance::from_meters(60.0));
        assert!(fence.contains(OFFICE_LOCATION, DistanceModel::Vincenty));
        assert!(fence.contains(inside, DistanceModel::Vincenty));
    }

    #[test]
    fn should_not_contain_point_outside_radius() {
        let fence = Geofence::builder().name("office").build().unwrap();
        let outside = OFFICE_LOCATION.destination(180.0, Distance::from_meters(150.0));
        assert!(!fence.contains(outside, DistanceModel::Haversine));
    }

    #[test]
    fn should_exclude_point_exactly_on_the_boundary() {
        let point = OFFICE_LOCATION.destination(30.0, Distance::from_meters(100.0));
        let radius = DistanceModel::Haversine.distance(OFFICE_LOCATION, point);
        let fence = Geofence::builder()
            .name("edge")
            .radius(radius)
            .build()
            .unwrap();
        assert!(!fence.contains(point, DistanceModel::Haversine));
    }

    #[test]
    fn should_validate_when_deserializing() {
        let empty_name = r#"{"name": "", "center": {"latitude": 0.0, "longitude": 0.0}}"#;
        assert!(serde_json::from_str::<Geofence>(empty_name).is_err());

        let negative_radius = r#"{"name": "desk", "center": {"latitude": 0.0, "longitude": 0.0}, "radius": -5.0}"#;
        assert!(serde_json::from_str::<Geofence>(negative_radius).is_err());

        let fence: Geofence = serde_json::from_str(
            r#"{"name": "desk", "center": {"latitude": 54.617106, "longitude": -5.941409}}"#,
        )
        .unwrap();
        assert_eq!(fence.radius, DEFAULT_GEOFENCE_RADIUS);
        assert_eq!(fence.center, OFFICE_LOCATION);
    }

    #[test]
    fn should_round_trip_through_json() {
        let fence = Geofence::builder().name("office").build().unwrap();
        let json = serde_json::to_string(&fence).unwrap();
        let back: Geofence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fence);
    }

    #[test]
    fn should_keep_explicit_id_and_center() {
        let id = GeofenceId::new();
        let center = Coordinate::new(-33.852_334, 151.210_608).unwrap();
        let fence = Geofence::builder()
            .id(id)
            .name("sydney")
            .center(center)
            .build()
            .unwrap();
        assert_eq!(fence.id, id);
        assert_eq!(fence.center, center);
    }
}
