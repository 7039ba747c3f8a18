use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::climo::{build_table, classify, empirical_percent, select_window};
use crate::error::{ClimoError, Result};
use crate::models::{
    CurrentConditions, HistoricalObservation, PercentileTable, StationConfig, StationResult,
};
use crate::readers::{HistoryReader, ObservationReader};
use crate::utils::constants::{HISTORY_DIR, OBSERVATIONS_DIR};

/// Everything one station's run depends on, threaded explicitly through the
/// pipeline so stations stay independent and safely parallel.
#[derive(Debug, Clone)]
pub struct StationContext {
    pub config: StationConfig,
    pub target_date: NaiveDate,
    pub window_half_width: i64,
}

impl StationContext {
    /// Resolve the target date: an explicit override wins, otherwise the
    /// station's own calendar date in its configured offset.
    pub fn resolve(
        config: StationConfig,
        date_override: Option<NaiveDate>,
        window_half_width: i64,
    ) -> Result<Self> {
        let target_date = match date_override {
            Some(date) => date,
            None => config.local_today()?,
        };

        Ok(Self {
            config,
            target_date,
            window_half_width,
        })
    }
}

/// The computed (not yet persisted) outcome of one station's pipeline.
#[derive(Debug, Clone)]
pub struct StationOutput {
    pub context: StationContext,
    pub result: StationResult,
    pub percentile_table: PercentileTable,
}

pub struct StationProcessor {
    data_dir: PathBuf,
    use_mmap: bool,
}

impl StationProcessor {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    fn history_path(&self, station_id: &str) -> PathBuf {
        self.data_dir
            .join(HISTORY_DIR)
            .join(format!("{}.csv", station_id))
    }

    fn feed_path(&self, station_id: &str) -> PathBuf {
        self.data_dir
            .join(OBSERVATIONS_DIR)
            .join(format!("{}.csv", station_id))
    }

    /// Run the pure pipeline for one station: load, window, baseline,
    /// classify. Performs no writes; a hard failure here leaves all
    /// persisted state untouched.
    pub fn process(&self, context: &StationContext) -> Result<StationOutput> {
        let station = &context.config;
        debug!(station_id = %station.id, date = %context.target_date, "Processing station");

        let history = HistoryReader::with_mmap(self.use_mmap)
            .read_history(&self.history_path(&station.id))?;
        let current = ObservationReader::new()
            .read_current(&self.feed_path(&station.id), context.target_date)?;

        let window = select_window(context.target_date, context.window_half_width, &history)?;
        let percentile_table = build_table(&window)?;

        let result = self.build_result(context, &history, current, &percentile_table)?;

        info!(
            station_id = %station.id,
            classified = result.is_classified(),
            percent = ?result.average_percent,
            "Station pipeline complete"
        );

        Ok(StationOutput {
            context: context.clone(),
            result,
            percentile_table,
        })
    }

    fn build_result(
        &self,
        context: &StationContext,
        history: &[HistoricalObservation],
        current: CurrentConditions,
        table: &PercentileTable,
    ) -> Result<StationResult> {
        let station = &context.config;
        let tavg = current.tavg();

        // A missing current observation degrades to explicit markers;
        // anything else is a real failure for this station
        let category = match classify(tavg, table) {
            Ok(bin) => Some(bin),
            Err(ClimoError::MissingCurrentObservation) => None,
            Err(e) => return Err(e),
        };

        // Empirical rank against the full record, not the window
        let average_percent = tavg.and_then(|value| {
            let sample: Vec<f64> = history.iter().filter_map(|obs| obs.tavg).collect();
            empirical_percent(&sample, value)
        });

        Ok(StationResult {
            station_name: station.name.clone(),
            station_label: station.label.clone(),
            record_span: station.record_span(),
            category,
            answer: category.map(|bin| bin.answer().to_string()),
            comment: category.map(|bin| bin.comment().to_string()),
            maximum: current.tmax,
            minimum: current.tmin,
            current_average: tavg,
            average_percent,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
