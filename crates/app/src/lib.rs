//! # geoproximity-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `LocationProvider` — the device's last known location, if any
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ProximityService` — check a coordinate or the last known location
//!     against the reference point and the configured geofences
//! - Orchestrate domain objects without knowing *where* locations come from
//!
//! ## Dependency rule
//! Depends on `geoproximity-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
