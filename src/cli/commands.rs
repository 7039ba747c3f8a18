use chrono::Datelike;

use crate::cli::args::{Cli, Commands};
use crate::error::{ClimoError, Result};
use crate::processors::{BatchProcessor, StationContext, StationOutcome, StationProcessor};
use crate::readers::StationReader;
use crate::store::HeatmapStore;
use crate::utils::constants::{HEATMAP_DIR, STATIONS_FILE};
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    let stations_path = cli.data_dir.join(STATIONS_FILE);

    match cli.command {
        Commands::Run {
            date,
            window,
            station_id,
            max_workers,
            mmap,
            quiet,
        } => {
            let reader = StationReader::new();
            let mut stations = reader.read_stations(&stations_path)?;

            if let Some(id) = station_id {
                stations.retain(|s| s.id == id);
                if stations.is_empty() {
                    return Err(ClimoError::StationNotFound { station_id: id });
                }
            }

            println!("Processing {} stations...", stations.len());
            println!("Data directory: {}", cli.data_dir.display());
            println!("Output directory: {}", cli.output_dir.display());

            let progress =
                ProgressReporter::new(stations.len() as u64, "Processing stations...", quiet);

            let processor = BatchProcessor::new(max_workers, window)
                .with_date_override(date)
                .with_mmap(mmap);

            let outcomes = processor.process_stations(
                &stations,
                &cli.data_dir,
                &cli.output_dir,
                Some(&progress),
            )?;

            let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
            progress.finish_with_message(&format!(
                "Processed {} stations ({} ok, {} failed)",
                outcomes.len(),
                succeeded,
                outcomes.len() - succeeded
            ));

            for outcome in &outcomes {
                match outcome {
                    StationOutcome::Success { station_id, result, .. } => {
                        let verdict = result
                            .answer
                            .clone()
                            .unwrap_or_else(|| "no observation".to_string());
                        let percent = result
                            .average_percent
                            .map(|p| format!("{}%", p))
                            .unwrap_or_else(|| "-".to_string());
                        println!("  {} {} ({})", station_id, verdict, percent);
                    }
                    StationOutcome::Failure {
                        station_id,
                        station_label,
                        cause,
                    } => {
                        println!("  {} ({}) FAILED: {}", station_id, station_label, cause);
                    }
                }
            }

            if succeeded == 0 && !outcomes.is_empty() {
                return Err(ClimoError::Config(
                    "All stations failed to process".to_string(),
                ));
            }

            println!("Run complete");
        }

        Commands::Classify {
            station_id,
            date,
            window,
        } => {
            let reader = StationReader::new();
            let station = reader.read_station(&stations_path, &station_id)?;

            let context = StationContext::resolve(station, date, window)?;
            let processor = StationProcessor::new(&cli.data_dir);
            let output = processor.process(&context)?;

            println!("{}", serde_json::to_string_pretty(&output.result)?);
        }

        Commands::Show { station_id, year } => {
            let reader = StationReader::new();
            let station = reader.read_station(&stations_path, &station_id)?;

            let year = match year {
                Some(y) => y,
                None => station.local_today()?.year(),
            };

            let store = HeatmapStore::new(cli.data_dir.join(HEATMAP_DIR));
            let grid = store.grid(&station_id, year)?;

            println!("{} {} ({} days recorded)", station.label, year, grid.populated_count());
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
    }

    Ok(())
}
