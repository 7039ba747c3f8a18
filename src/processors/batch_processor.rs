use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use tracing::warn;

use crate::error::{ClimoError, Result};
use crate::models::{HeatmapGrid, StationConfig, StationResult};
use crate::processors::{StationContext, StationOutput, StationProcessor};
use crate::store::HeatmapStore;
use crate::utils::constants::HEATMAP_DIR;
use crate::utils::progress::ProgressReporter;
use crate::writers::ResultWriter;

/// Per-station outcome of a batch run. A failed station carries its
/// diagnostic and never blocks the others.
#[derive(Debug)]
pub enum StationOutcome {
    Success {
        station_id: String,
        result: StationResult,
        grid: HeatmapGrid,
    },
    Failure {
        station_id: String,
        station_label: String,
        cause: String,
    },
}

impl StationOutcome {
    pub fn station_id(&self) -> &str {
        match self {
            StationOutcome::Success { station_id, .. } => station_id,
            StationOutcome::Failure { station_id, .. } => station_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StationOutcome::Success { .. })
    }
}

pub struct BatchProcessor {
    max_workers: usize,
    window_half_width: i64,
    date_override: Option<NaiveDate>,
    use_mmap: bool,
}

impl BatchProcessor {
    pub fn new(max_workers: usize, window_half_width: i64) -> Self {
        Self {
            max_workers,
            window_half_width,
            date_override: None,
            use_mmap: false,
        }
    }

    pub fn with_date_override(mut self, date: Option<NaiveDate>) -> Self {
        self.date_override = date;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Process every station, writing each successful station's outputs
    /// (heatmap store, result record, renderer grid) together. Stations are
    /// independent, so they run on a bounded worker pool; one station's
    /// failure is isolated into its outcome.
    pub fn process_stations(
        &self,
        stations: &[StationConfig],
        data_dir: &Path,
        output_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<StationOutcome>> {
        let processed_count = Arc::new(AtomicUsize::new(0));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ClimoError::Config(e.to_string()))?;

        let mut outcomes: Vec<(usize, StationOutcome)> = pool.install(|| {
            stations
                .par_iter()
                .enumerate()
                .map(|(index, station)| {
                    let outcome = self.process_one(station, data_dir, output_dir);

                    let count = processed_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    (index, outcome)
                })
                .collect()
        });

        // Back to configuration order
        outcomes.sort_by_key(|(index, _)| *index);
        Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }

    fn process_one(
        &self,
        station: &StationConfig,
        data_dir: &Path,
        output_dir: &Path,
    ) -> StationOutcome {
        match self.run_station(station, data_dir, output_dir) {
            Ok((result, grid)) => StationOutcome::Success {
                station_id: station.id.clone(),
                result,
                grid,
            },
            Err(e) => {
                warn!(station_id = %station.id, error = %e, "Station failed");
                StationOutcome::Failure {
                    station_id: station.id.clone(),
                    station_label: station.label.clone(),
                    cause: e.to_string(),
                }
            }
        }
    }

    /// One station end to end: pure pipeline first, then the writes as a
    /// group. Nothing is persisted for a station whose pipeline failed.
    fn run_station(
        &self,
        station: &StationConfig,
        data_dir: &Path,
        output_dir: &Path,
    ) -> Result<(StationResult, HeatmapGrid)> {
        let context = StationContext::resolve(
            station.clone(),
            self.date_override,
            self.window_half_width,
        )?;

        let processor = StationProcessor::new(data_dir).with_mmap(self.use_mmap);
        let output: StationOutput = processor.process(&context)?;

        let year = context.target_date.year();
        let store = HeatmapStore::new(self.heatmap_root(data_dir));
        let rows = store.reconcile_and_persist(
            &station.id,
            year,
            context.target_date,
            output.result.average_percent,
        )?;

        let grid = HeatmapGrid::from_rows(year, &rows);

        let writer = ResultWriter::new(output_dir);
        writer.write_result(&station.id, &output.result)?;
        writer.write_grid(&station.id, &grid)?;

        Ok((output.result, grid))
    }

    fn heatmap_root(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(HEATMAP_DIR)
    }
}
