use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ClimoError, Result};
use crate::models::{HeatmapGrid, HeatmapRow};

/// Durable per-(station, year) percentile history under
/// `<root>/<station_id>/<year>.json`.
///
/// Every mutation is a read-modify-write over the full row set followed by
/// an atomic replace-on-write, so an overlapping or interrupted run leaves
/// either the previous or the new complete file on disk.
pub struct HeatmapStore {
    root: PathBuf,
}

impl HeatmapStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn store_path(&self, station_id: &str, year: i32) -> PathBuf {
        self.root.join(station_id).join(format!("{}.json", year))
    }

    /// Load the row set for a (station, year). A store that does not exist
    /// yet (first run of a new year) is an empty set, not an error.
    pub fn load(&self, station_id: &str, year: i32) -> Result<Vec<HeatmapRow>> {
        let path = self.store_path(station_id, year);
        if !path.exists() {
            debug!(station_id, year, "No heatmap store yet, starting empty");
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let rows: Vec<HeatmapRow> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ClimoError::malformed_store(path.display().to_string(), e.to_string()))?;

        validate_rows(&path, year, &rows)?;
        Ok(rows)
    }

    /// Rewrite the full row set atomically: serialize to a temporary file
    /// in the store directory, then rename over the target.
    pub fn persist(&self, station_id: &str, year: i32, rows: &[HeatmapRow]) -> Result<()> {
        let path = self.store_path(station_id, year);
        let dir = path
            .parent()
            .ok_or_else(|| ClimoError::Config(format!("No parent directory for {}", path.display())))?;
        fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&temp, rows)?;
        temp.persist(&path).map_err(|e| e.error)?;

        debug!(station_id, year, rows = rows.len(), "Persisted heatmap store");
        Ok(())
    }

    /// Reconcile one day's percentile into the store and rewrite it.
    /// Returns the full updated row set. A missing percentile makes no
    /// mutation and skips the rewrite entirely.
    pub fn reconcile_and_persist(
        &self,
        station_id: &str,
        year: i32,
        date: NaiveDate,
        percentile: Option<u8>,
    ) -> Result<Vec<HeatmapRow>> {
        let mut rows = self.load(station_id, year)?;

        if reconcile(&mut rows, date, percentile) {
            self.persist(station_id, year, &rows)?;
        }

        Ok(rows)
    }

    /// Derive the renderer-facing grid for a (station, year).
    pub fn grid(&self, station_id: &str, year: i32) -> Result<HeatmapGrid> {
        let rows = self.load(station_id, year)?;
        Ok(HeatmapGrid::from_rows(year, &rows))
    }
}

/// Update-or-append over the row set. Update preserves the row's position;
/// append goes to the end; a missing percentile never mutates and never
/// fails.
pub fn reconcile(rows: &mut Vec<HeatmapRow>, date: NaiveDate, percentile: Option<u8>) -> bool {
    let Some(percentile) = percentile else {
        return false;
    };

    match rows.iter_mut().find(|row| row.date == date) {
        Some(row) => {
            row.percentile = Some(percentile);
        }
        None => {
            rows.push(HeatmapRow::new(date, Some(percentile)));
        }
    }

    true
}

fn validate_rows(path: &Path, year: i32, rows: &[HeatmapRow]) -> Result<()> {
    let mut seen = HashSet::new();
    for row in rows {
        if row.date.year() != year {
            return Err(ClimoError::malformed_store(
                path.display().to_string(),
                format!("row date {} outside store year {}", row.date, year),
            ));
        }
        if let Some(p) = row.percentile {
            if p > 100 {
                return Err(ClimoError::malformed_store(
                    path.display().to_string(),
                    format!("percentile {} out of range on {}", p, row.date),
                ));
            }
        }
        if !seen.insert(row.date) {
            return Err(ClimoError::malformed_store(
                path.display().to_string(),
                format!("duplicate row for {}", row.date),
            ));
        }
    }
    Ok(())
}
