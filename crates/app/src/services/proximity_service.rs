//! Proximity service — use-cases for checking where a location stands
//! relative to the reference point and the configured geofences.

use geoproximity_domain::coordinate::Coordinate;
use geoproximity_domain::error::GeoError;
use geoproximity_domain::geofence::Geofence;
use geoproximity_domain::proximity::{ProximityChecker, ProximityReport};

use crate::ports::LocationProvider;

/// Application service wrapping a [`ProximityChecker`] and a location source.
pub struct ProximityService<L> {
    provider: L,
    checker: ProximityChecker,
    geofences: Vec<Geofence>,
}

impl<L: LocationProvider> ProximityService<L> {
    /// Create a new service reading locations from `provider`.
    pub fn new(provider: L, checker: ProximityChecker) -> Self {
        Self {
            provider,
            checker,
            geofences: Vec::new(),
        }
    }

    /// Replace the set of geofences consulted by [`Self::geofences_containing`].
    #[must_use]
    pub fn with_geofences(mut self, geofences: Vec<Geofence>) -> Self {
        self.geofences = geofences;
        self
    }

    #[must_use]
    pub fn checker(&self) -> &ProximityChecker {
        &self.checker
    }

    #[must_use]
    pub fn geofences(&self) -> &[Geofence] {
        &self.geofences
    }

    /// Check an explicit coordinate against the reference point.
    #[must_use]
    pub fn check_coordinate(&self, candidate: Coordinate) -> ProximityReport {
        let report = self.checker.report(candidate);
        tracing::debug!(
            candidate = %report.candidate,
            distance = %report.distance,
            threshold = %report.threshold,
            near = report.near,
            "checked coordinate against reference"
        );
        report
    }

    /// Fetch the last known location from the provider and check it.
    ///
    /// Returns `Ok(None)` when the provider has no fix.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, typically
    /// [`GeoError::LocationSource`].
    pub async fn check_last_known_location(&self) -> Result<Option<ProximityReport>, GeoError> {
        let Some(fix) = self.provider.last_known_location().await? else {
            tracing::debug!("no last known location available");
            return Ok(None);
        };
        tracing::debug!(
            coordinate = %fix.coordinate,
            recorded_at = %fix.recorded_at,
            accuracy_meters = ?fix.accuracy_meters,
            "received last known location"
        );
        Ok(Some(self.check_coordinate(fix.coordinate)))
    }

    /// All configured geofences that contain `point`, in configuration order.
    #[must_use]
    pub fn geofences_containing(&self, point: Coordinate) -> Vec<&Geofence> {
        self.checker.geofences_containing(&self.geofences, point)
    }
}
