//! Location source replaying fixes from JSON lines.

use std::future::Future;
use std::io::BufRead;
use std::path::Path;

use geoproximity_app::ports::LocationProvider;
use geoproximity_domain::coordinate::Coordinate;
use geoproximity_domain::error::GeoError;
use geoproximity_domain::location::{LocationFix, Timestamp, now};
use serde::Deserialize;

use crate::error::LocationSourceError;

/// One line of a track, before validation.
#[derive(Debug, Deserialize)]
struct FixRecord {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    accuracy_meters: Option<f64>,
    #[serde(default)]
    recorded_at: Option<Timestamp>,
}

/// In-memory track of location fixes loaded from JSON lines.
#[derive(Debug, Clone, Default)]
pub struct JsonLinesLocationSource {
    fixes: Vec<LocationFix>,
    skipped: usize,
}

impl JsonLinesLocationSource {
    /// Parse a track from text. Invalid lines are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_lines(text.lines(), now())
    }

    /// Read a track from a buffered reader.
    ///
    /// Lines are split on `\n` and decoded one at a time, so a line that is
    /// not valid UTF-8 is skipped like any other invalid line.
    ///
    /// # Errors
    ///
    /// Returns [`LocationSourceError::Stream`] if reading fails. Malformed
    /// lines are not errors.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LocationSourceError> {
        let lines = reader
            .split(b'\n')
            .collect::<Result<Vec<_>, _>>()
            .map_err(LocationSourceError::Stream)?;
        Ok(Self::parse_lines(lines, now()))
    }

    /// Read a track file.
    ///
    /// # Errors
    ///
    /// Returns [`LocationSourceError::Read`] if the file cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LocationSourceError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| LocationSourceError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let track = Self::parse_lines(bytes.split(|byte| *byte == b'\n'), now());
        tracing::debug!(
            path = %path.display(),
            fixes = track.fixes.len(),
            skipped = track.skipped,
            "loaded location track"
        );
        Ok(track)
    }

    fn parse_lines<L: AsRef<[u8]>>(
        lines: impl IntoIterator<Item = L>,
        loaded_at: Timestamp,
    ) -> Self {
        let mut track = Self::default();
        for (index, raw) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let line = match std::str::from_utf8(raw.as_ref()) {
                Ok(line) => line.trim_start_matches('\u{feff}').trim(),
                Err(reason) => {
                    tracing::warn!(line = line_number, %reason, "skipping undecodable line");
                    track.skipped += 1;
                    continue;
                }
            };
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_fix(line, loaded_at) {
                Ok(fix) => track.fixes.push(fix),
                Err(reason) => {
                    tracing::warn!(line = line_number, %reason, "skipping invalid location fix");
                    track.skipped += 1;
                }
            }
        }
        track
    }

    /// Valid fixes, in file order.
    #[must_use]
    pub fn fixes(&self) -> &[LocationFix] {
        &self.fixes
    }

    /// Number of non-blank, non-comment lines that were rejected.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The fix with the latest timestamp; later lines win ties.
    #[must_use]
    pub fn latest(&self) -> Option<&LocationFix> {
        self.fixes.iter().max_by_key(|fix| fix.recorded_at)
    }
}

fn parse_fix(
    line: &str,
    loaded_at: Timestamp,
) -> Result<LocationFix, Box<dyn std::error::Error>> {
    let record: FixRecord = serde_json::from_str(line)?;
    let coordinate = Coordinate::new(record.latitude, record.longitude)?;
    let fix = LocationFix {
        coordinate,
        accuracy_meters: record.accuracy_meters,
        recorded_at: record.recorded_at.unwrap_or(loaded_at),
    };
    fix.validate()?;
    Ok(fix)
}

impl LocationProvider for JsonLinesLocationSource {
    fn last_known_location(
        &self,
    ) -> impl Future<Output = Result<Option<LocationFix>, GeoError>> + Send {
        let fix = self.latest().cloned();
        async { Ok(fix) }
    }
}
