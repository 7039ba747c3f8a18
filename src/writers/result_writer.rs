use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ClimoError, Result};
use crate::models::{HeatmapGrid, StationResult};
use crate::utils::constants::{GRIDS_DIR, RESULTS_DIR};

/// Writes the downstream-facing JSON artifacts. Rewrites are atomic for the
/// same reason the heatmap store's are: a half-written result must never be
/// visible to the public consumer.
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the per-station result record to results/<id>.json.
    pub fn write_result(&self, station_id: &str, result: &StationResult) -> Result<PathBuf> {
        let path = self.output_dir.join(RESULTS_DIR).join(format!("{}.json", station_id));
        self.write_json(&path, result)?;
        Ok(path)
    }

    /// Write the renderer grid to grids/<id>-<year>.json.
    pub fn write_grid(&self, station_id: &str, grid: &HeatmapGrid) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(GRIDS_DIR)
            .join(format!("{}-{}.json", station_id, grid.year));
        self.write_json(&path, grid)?;
        Ok(path)
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| ClimoError::Config(format!("No parent directory for {}", path.display())))?;
        fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&temp, value)?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
