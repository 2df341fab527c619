//! Proximity check against a fixed reference point.
//!
//! The default checker answers one question: is a coordinate within 500 m
//! of the office at (54.617106, -5.941409)? The comparison is strict, so a
//! point exactly on the threshold is not near.

use serde::Serialize;

use crate::coordinate::Coordinate;
use crate::distance::{Distance, DistanceModel};
use crate::error::{GeoError, ValidationError};
use crate::geofence::Geofence;

/// The office reference location.
pub const OFFICE_LOCATION: Coordinate =
    Coordinate::from_degrees_unchecked(54.617_106, -5.941_409);

/// Distance under which a point counts as near the reference.
pub const PROXIMITY_THRESHOLD: Distance = Distance::from_meters(500.0);

/// Decides whether coordinates lie within a threshold of a reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityChecker {
    reference: Coordinate,
    threshold: Distance,
    model: DistanceModel,
}

impl Default for ProximityChecker {
    fn default() -> Self {
        Self {
            reference: OFFICE_LOCATION,
            threshold: PROXIMITY_THRESHOLD,
            model: DistanceModel::default(),
        }
    }
}

impl ProximityChecker {
    /// Create a builder starting from the office defaults.
    #[must_use]
    pub fn builder() -> ProximityCheckerBuilder {
        ProximityCheckerBuilder::default()
    }

    /// The reference coordinate distances are measured from.
    #[must_use]
    pub fn reference_location(&self) -> Coordinate {
        self.reference
    }

    #[must_use]
    pub fn threshold(&self) -> Distance {
        self.threshold
    }

    #[must_use]
    pub fn model(&self) -> DistanceModel {
        self.model
    }

    /// Geodesic distance from the reference to `candidate`.
    #[must_use]
    pub fn distance_to_reference(&self, candidate: Coordinate) -> Distance {
        self.model.distance(self.reference, candidate)
    }

    /// `true` iff `candidate` is strictly closer than the threshold.
    #[must_use]
    pub fn is_near_reference(&self, candidate: Coordinate) -> bool {
        self.distance_to_reference(candidate) < self.threshold
    }

    /// Validate raw degrees and run [`Self::is_near_reference`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Validation`] when the inputs are not a valid
    /// coordinate.
    pub fn check(&self, latitude: f64, longitude: f64) -> Result<bool, GeoError> {
        let candidate = Coordinate::new(latitude, longitude)?;
        Ok(self.is_near_reference(candidate))
    }

    /// Full outcome of a check, suitable for display or serialization.
    #[must_use]
    pub fn report(&self, candidate: Coordinate) -> ProximityReport {
        let distance = self.distance_to_reference(candidate);
        ProximityReport {
            candidate,
            reference: self.reference,
            distance,
            threshold: self.threshold,
            near: distance < self.threshold,
        }
    }

    /// The geofences in `geofences` that contain `point`, in order, measured
    /// with this checker's distance model.
    #[must_use]
    pub fn geofences_containing<'a>(
        &self,
        geofences: &'a [Geofence],
        point: Coordinate,
    ) -> Vec<&'a Geofence> {
        geofences
            .iter()
            .filter(|fence| fence.contains(point, self.model))
            .collect()
    }
}

/// Builder for a [`ProximityChecker`] with a non-default reference,
/// threshold, or distance model.
#[derive(Debug, Default)]
pub struct ProximityCheckerBuilder {
    reference: Option<Coordinate>,
    threshold: Option<Distance>,
    model: Option<DistanceModel>,
}

impl ProximityCheckerBuilder {
    #[must_use]
    pub fn reference(mut self, reference: Coordinate) -> Self {
        self.reference = Some(reference);
        self
    }

    #[must_use]
    pub fn threshold(mut self, threshold: Distance) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn model(mut self, model: DistanceModel) -> Self {
        self.model = Some(model);
        self
    }

    /// # Errors
    ///
    /// Returns [`GeoError::Validation`] when the threshold is not a finite
    /// positive length.
    pub fn build(self) -> Result<ProximityChecker, GeoError> {
        let defaults = ProximityChecker::default();
        let threshold = self.threshold.unwrap_or(defaults.threshold);
        if !threshold.is_positive_finite() {
            return Err(ValidationError::InvalidThreshold(threshold.meters()).into());
        }
        Ok(ProximityChecker {
            reference: self.reference.unwrap_or(defaults.reference),
            threshold,
            model: self.model.unwrap_or(defaults.model),
        })
    }
}

/// Outcome of checking one candidate against the reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProximityReport {
    pub candidate: Coordinate,
    pub reference: Coordinate,
    pub distance: Distance,
    pub threshold: Distance,
    pub near: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_office_as_reference_location() {
        let checker = ProximityChecker::default();
        let reference = checker.reference_location();
        assert!((reference.latitude() - 54.617_106).abs() < f64::EPSILON);
        assert!((reference.longitude() + 5.941_409).abs() < f64::EPSILON);
        assert!((checker.threshold().meters() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_be_near_when_candidate_is_the_reference() {
        let checker = ProximityChecker::default();
        assert!(checker.is_near_reference(checker.reference_location()));
        assert_eq!(checker.check(54.617_106, -5.941_409).ok(), Some(true));
    }

    #[test]
    fn should_not_be_near_null_island() {
        let checker = ProximityChecker::default();
        assert_eq!(checker.check(0.0, 0.0).ok(), Some(false));
    }

    #[test]
    fn should_not_be_near_antipode() {
        let checker = ProximityChecker::default();
        let antipode = Coordinate::new(-54.617_106, 174.058_591).unwrap();
        assert!(!checker.is_near_reference(antipode));
        assert!(checker.distance_to_reference(antipode).kilometers() > 19_000.0);
    }

    #[test]
    fn should_be_near_at_300_meters_and_not_at_700() {
        let checker = ProximityChecker::default();
        let close = OFFICE_LOCATION.destination(60.0, Distance::from_meters(300.0));
        let far = OFFICE_LOCATION.destination(240.0, Distance::from_meters(700.0));
        assert!(checker.is_near_reference(close));
        assert!(!checker.is_near_reference(far));
    }

    #[test]
    fn should_not_be_near_when_exactly_at_threshold() {
        let candidate = OFFICE_LOCATION.destination(123.0, Distance::from_meters(500.0));
        for model in [DistanceModel::Vincenty, DistanceModel::Haversine] {
            let exact = model.distance(OFFICE_LOCATION, candidate);
            let checker = ProximityChecker::builder()
                .threshold(exact)
                .model(model)
                .build()
                .unwrap();
            assert!(!checker.is_near_reference(candidate));
            assert!(!checker.report(candidate).near);
        }
    }

    #[test]
    fn should_reject_invalid_raw_coordinates() {
        let checker = ProximityChecker::default();
        assert!(matches!(
            checker.check(95.0, 0.0),
            Err(GeoError::Validation(ValidationError::LatitudeOutOfRange(_)))
        ));
        assert!(matches!(
            checker.check(0.0, 181.0),
            Err(GeoError::Validation(ValidationError::LongitudeOutOfRange(_)))
        ));
    }

    #[test]
    fn should_reject_invalid_threshold() {
        let result = ProximityChecker::builder()
            .threshold(Distance::from_meters(-1.0))
            .build();
        assert!(matches!(
            result,
            Err(GeoError::Validation(ValidationError::InvalidThreshold(_)))
        ));
    }

    #[test]
    fn should_measure_from_custom_reference() {
        let sydney = Coordinate::new(-33.852_334_1, 151.210_608_5).unwrap();
        let checker = ProximityChecker::builder()
            .reference(sydney)
            .build()
            .unwrap();
        assert!(checker.is_near_reference(sydney));
        assert!(!checker.is_near_reference(OFFICE_LOCATION));
    }

    #[test]
    fn should_fill_report_fields() {
        let checker = ProximityChecker::default();
        let candidate = OFFICE_LOCATION.destination(0.0, Distance::from_meters(200.0));
        let report = checker.report(candidate);
        assert!(report.near);
        assert_eq!(report.reference, OFFICE_LOCATION);
        assert_eq!(report.threshold, PROXIMITY_THRESHOLD);
        assert!((report.distance.meters() - 200.0).abs() < 2.0);
    }

    #[test]
    fn should_filter_geofences_without_a_location_source() {
        let checker = ProximityChecker::default();
        let fences = [
            Geofence::builder()
                .name("desk")
                .radius(Distance::from_meters(20.0))
                .build()
                .unwrap(),
            Geofence::builder()
                .name("campus")
                .radius(Distance::from_meters(1_000.0))
                .build()
                .unwrap(),
        ];
        let point = OFFICE_LOCATION.destination(270.0, Distance::from_meters(50.0));

        let names: Vec<&str> = checker
            .geofences_containing(&fences, point)
            .into_iter()
            .map(|fence| fence.name.as_str())
            .collect();
        assert_eq!(names, vec!["campus"]);
        assert!(checker.geofences_containing(&[], point).is_empty());
    }

    #[test]
    fn should_serialize_report_as_flat_json() {
        let report = ProximityChecker::default().report(OFFICE_LOCATION);
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["near"], true);
        assert_eq!(json["threshold"], 500.0);
        assert_eq!(json["candidate"]["latitude"], 54.617_106);
    }
}
