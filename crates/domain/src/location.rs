//! Location fixes — a coordinate reported by a location source at a point in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{GeoError, ValidationError};

/// UTC timestamp attached to location fixes.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// A single reading from a location source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    /// Horizontal accuracy radius in meters, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_meters: Option<f64>,
    pub recorded_at: Timestamp,
}

impl LocationFix {
    /// A fix taken now, without accuracy information.
    #[must_use]
    pub fn now(coordinate: Coordinate) -> Self {
        Self::at(coordinate, now())
    }

    /// A fix taken at `recorded_at`.
    #[must_use]
    pub fn at(coordinate: Coordinate, recorded_at: Timestamp) -> Self {
        Self {
            coordinate,
            accuracy_meters: None,
            recorded_at,
        }
    }

    #[must_use]
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy_meters = Some(meters);
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Validation`] when the accuracy radius is present
    /// but negative or not finite.
    pub fn validate(&self) -> Result<(), GeoError> {
        match self.accuracy_meters {
            Some(meters) if !meters.is_finite() || meters < 0.0 => {
                Err(ValidationError::InvalidAccuracy(meters).into())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_fix_with_current_time() {
        let before = Utc::now();
        let fix = LocationFix::now(Coordinate::new(1.0, 2.0).unwrap());
        let after = Utc::now();
        assert!(fix.recorded_at >= before);
        assert!(fix.recorded_at <= after);
        assert!(fix.accuracy_meters.is_none());
    }

    #[test]
    fn should_omit_missing_accuracy_when_serializing() {
        let ts = "2026-10-18T09:30:00Z".parse::<Timestamp>().unwrap();
        let fix = LocationFix::at(Coordinate::new(54.6, -5.9).unwrap(), ts);
        let json = serde_json::to_value(&fix).unwrap();
        assert!(json.get("accuracy_meters").is_none());
        assert_eq!(json["recorded_at"], "2026-10-18T09:30:00Z");
    }

    #[test]
    fn should_keep_accuracy() {
        let fix = LocationFix::now(Coordinate::new(0.0, 0.0).unwrap()).with_accuracy(12.5);
        assert_eq!(fix.accuracy_meters, Some(12.5));
        assert!(fix.validate().is_ok());
    }

    #[test]
    fn should_reject_negative_or_non_finite_accuracy() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        for meters in [-1.0, f64::NAN, f64::INFINITY] {
            let fix = LocationFix::now(origin).with_accuracy(meters);
            assert!(matches!(
                fix.validate(),
                Err(GeoError::Validation(ValidationError::InvalidAccuracy(_)))
            ));
        }
        assert!(LocationFix::now(origin).validate().is_ok());
        assert!(LocationFix::now(origin).with_accuracy(0.0).validate().is_ok());
    }
}
