//! Location port — where the last known device location comes from.

use std::future::Future;

use geoproximity_domain::error::GeoError;
use geoproximity_domain::location::LocationFix;

/// Source of location fixes.
///
/// A provider may legitimately have nothing to report (no fix yet, location
/// disabled); that is `Ok(None)`, not an error.
pub trait LocationProvider {
    /// The most recent fix known to the provider.
    fn last_known_location(
        &self,
    ) -> impl Future<Output = Result<Option<LocationFix>, GeoError>> + Send;
}
