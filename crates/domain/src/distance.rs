//! Geodesic distance between two coordinates.
//!
//! Two models are provided. [`DistanceModel::Vincenty`] solves the inverse
//! problem on the WGS-84 ellipsoid and is accurate to well under a millimeter;
//! it is the default. [`DistanceModel::Haversine`] treats the Earth as a
//! sphere of mean radius and is cheaper but off by up to ~0.5%.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Mean Earth radius (IUGG), in meters.
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_008.8;

/// WGS-84 semi-major axis, in meters.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS-84 flattening.
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// A length along the Earth's surface, in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    /// Zero meters.
    pub const ZERO: Self = Self(0.0);

    /// Wrap a length expressed in meters.
    #[must_use]
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    /// Length in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }

    /// Length in kilometers.
    #[must_use]
    pub fn kilometers(self) -> f64 {
        self.0 / 1_000.0
    }

    /// Whether this is a usable radius or threshold: finite and above zero.
    #[must_use]
    pub fn is_positive_finite(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1_000.0 {
            write!(f, "{:.1} km", self.kilometers())
        } else {
            write!(f, "{:.1} m", self.0)
        }
    }
}

/// How to compute the distance between two coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModel {
    /// Ellipsoidal inverse solution on WGS-84.
    #[default]
    Vincenty,
    /// Great-circle distance on a sphere of mean Earth radius.
    Haversine,
}

impl DistanceModel {
    /// Geodesic distance between `from` and `to`.
    #[must_use]
    pub fn distance(self, from: Coordinate, to: Coordinate) -> Distance {
        match self {
            Self::Haversine => haversine(from, to),
            Self::Vincenty => vincenty(from, to).unwrap_or_else(|| haversine(from, to)),
        }
    }
}

impl fmt::Display for DistanceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vincenty => f.write_str("vincenty"),
            Self::Haversine => f.write_str("haversine"),
        }
    }
}

impl std::str::FromStr for DistanceModel {
    type Err = UnknownDistanceModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vincenty" => Ok(Self::Vincenty),
            "haversine" => Ok(Self::Haversine),
            _ => Err(UnknownDistanceModel(s.to_string())),
        }
    }
}

/// Returned when parsing a [`DistanceModel`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distance model {0:?}, expected \"vincenty\" or \"haversine\"")]
pub struct UnknownDistanceModel(String);

fn haversine(from: Coordinate, to: Coordinate) -> Distance {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    Distance(EARTH_MEAN_RADIUS_METERS * c)
}

/// Vincenty's inverse formula. `None` when the iteration fails to converge,
/// which only happens for nearly antipodal points.
#[allow(clippy::similar_names)]
fn vincenty(from: Coordinate, to: Coordinate) -> Option<Distance> {
    let a = WGS84_SEMI_MAJOR_AXIS;
    let f = WGS84_FLATTENING;
    let b = (1.0 - f) * a;

    let l = wrap_radians((to.longitude() - from.longitude()).to_radians());
    let u1 = ((1.0 - f) * from.latitude().to_radians().tan()).atan();
    let u2 = ((1.0 - f) * to.latitude().to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Some(Distance::ZERO);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // equatorial line: cos_sq_alpha is zero
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if lambda.abs() > PI {
            return None;
        }
        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(Distance(b * big_a * (sigma - delta_sigma)));
        }
    }
    None
}

/// Wrap an angle into `[-PI, PI)`.
fn wrap_radians(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}
