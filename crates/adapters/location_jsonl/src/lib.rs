//! # geoproximity-adapter-location-jsonl
//!
//! Location adapter — a [`LocationProvider`](geoproximity_app::ports::LocationProvider)
//! backed by a recorded track of fixes, one JSON object per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! {"latitude": 54.6171, "longitude": -5.9414, "recorded_at": "2026-10-18T09:30:00Z"}
//! {"latitude": 54.6175, "longitude": -5.9402, "accuracy_meters": 12.0}
//! ```
//!
//! Lines that fail to parse, or whose coordinates are out of range, are
//! skipped with a warning. The last known location is the fix with the
//! latest `recorded_at`; fixes without a timestamp are stamped with the time
//! the track was loaded.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `geoproximity-app` and `geoproximity-domain`.

pub mod error;
pub mod source;

pub use error::LocationSourceError;
pub use source::JsonLinesLocationSource;
