//! Rendering of check results for the terminal.

use geoproximity_domain::geofence::Geofence;
use geoproximity_domain::proximity::{ProximityChecker, ProximityReport};
use serde_json::json;

/// Human-readable or JSON rendering of a single check.
pub fn report(report: &ProximityReport, geofences: &[&Geofence], as_json: bool) -> String {
    let names: Vec<&str> = geofences.iter().map(|fence| fence.name.as_str()).collect();
    if as_json {
        return json!({
            "candidate": report.candidate,
            "reference": report.reference,
            "distance_meters": report.distance,
            "threshold_meters": report.threshold,
            "near": report.near,
            "geofences": names,
        })
        .to_string();
    }

    let verdict = if report.near { "NEAR" } else { "NOT NEAR" };
    let mut out = format!(
        "{verdict}: {} is {} from {} (threshold {})",
        report.candidate, report.distance, report.reference, report.threshold
    );
    if !names.is_empty() {
        out.push_str(&format!("\ninside geofences: {}", names.join(", ")));
    }
    out
}

/// Description of the reference point a checker measures from.
pub fn reference(checker: &ProximityChecker, as_json: bool) -> String {
    if as_json {
        return json!({
            "reference": checker.reference_location(),
            "threshold_meters": checker.threshold(),
            "model": checker.model(),
        })
        .to_string();
    }
    format!(
        "reference {} threshold {} ({})",
        checker.reference_location(),
        checker.threshold(),
        checker.model()
    )
}

/// Message printed when a track holds no usable fix.
pub fn no_location(as_json: bool) -> String {
    if as_json {
        json!({ "location": null }).to_string()
    } else {
        "no location available".to_string()
    }
}
