//! JSON-lines adapter error types.

use std::path::PathBuf;

use geoproximity_domain::error::GeoError;

/// Errors specific to loading a JSON-lines track.
#[derive(Debug, thiserror::Error)]
pub enum LocationSourceError {
    /// The track file could not be read.
    #[error("failed to read location track {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already-open stream failed.
    #[error("failed to read location stream")]
    Stream(#[source] std::io::Error),
}

impl From<LocationSourceError> for GeoError {
    fn from(err: LocationSourceError) -> Self {
        GeoError::LocationSource(Box::new(err))
    }
}
