//! # geoproximity-domain
//!
//! Pure domain model for the geoproximity check.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Coordinates** (validated latitude/longitude pairs)
//! - Define **Distances** and the geodesic models that compute them
//! - Define **Geofences** (named circular regions)
//! - Define **Location fixes** (a coordinate observed at a point in time)
//! - Define the **ProximityChecker** (is a point within 500 m of the office?)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod coordinate;
pub mod distance;
pub mod geofence;
pub mod location;
pub mod proximity;
