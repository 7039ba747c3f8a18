use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use memmap2::Mmap;
use serde::Deserialize;

use crate::error::{ClimoError, Result};
use crate::models::HistoricalObservation;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, MAX_VALID_TEMP, MIN_VALID_TEMP};

/// One row of the durable historical store: year,month,day,tmax,tmin with
/// empty fields for missing values.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    year: i32,
    month: u32,
    day: u32,
    tmax: Option<f64>,
    tmin: Option<f64>,
}

pub struct HistoryReader {
    use_mmap: bool,
}

impl HistoryReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read a station's full historical record. The store is read-only for
    /// the engine; it is rebuilt into memory on every run.
    pub fn read_history(&self, path: &Path) -> Result<Vec<HistoricalObservation>> {
        if self.use_mmap {
            let file = File::open(path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            self.parse(path, &mmap[..])
        } else {
            let file = File::open(path)?;
            let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
            self.parse(path, reader)
        }
    }

    fn parse<R: Read>(&self, path: &Path, input: R) -> Result<Vec<HistoricalObservation>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<HistoryRow>() {
            let row = row.map_err(|e| {
                ClimoError::malformed_store(path.display().to_string(), e.to_string())
            })?;

            let obs = HistoricalObservation::new(row.year, row.month, row.day, row.tmax, row.tmin)
                .map_err(|e| {
                    ClimoError::malformed_store(path.display().to_string(), e.to_string())
                })?;

            for temp in [obs.tmax, obs.tmin].into_iter().flatten() {
                if !(MIN_VALID_TEMP..=MAX_VALID_TEMP).contains(&temp) {
                    return Err(ClimoError::malformed_store(
                        path.display().to_string(),
                        format!("temperature {} out of range on {}", temp, obs.date),
                    ));
                }
            }

            records.push(obs);
        }

        Ok(records)
    }
}

impl Default for HistoryReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_store(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_read_history() -> Result<()> {
        let store = write_store(
            "year,month,day,tmax,tmin\n\
             1987,7,14,21.5,11.0\n\
             1987,7,15,23.0,12.5\n\
             1987,7,16,,13.0\n",
        );

        let reader = HistoryReader::new();
        let records = reader.read_history(store.path())?;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].tavg, Some(16.25));
        assert_eq!(records[1].date.to_string(), "1987-07-15");
        // Missing tmax stays missing, and tavg with it
        assert_eq!(records[2].tmax, None);
        assert_eq!(records[2].tavg, None);

        Ok(())
    }

    #[test]
    fn test_mmap_path_matches_buffered() -> Result<()> {
        let store = write_store(
            "year,month,day,tmax,tmin\n\
             2000,1,1,2.0,-4.0\n\
             2000,1,2,1.5,-6.5\n",
        );

        let buffered = HistoryReader::new().read_history(store.path())?;
        let mapped = HistoryReader::with_mmap(true).read_history(store.path())?;
        assert_eq!(buffered, mapped);

        Ok(())
    }

    #[test]
    fn test_invalid_calendar_date_is_malformed_store() {
        let store = write_store(
            "year,month,day,tmax,tmin\n\
             2023,2,30,5.0,1.0\n",
        );

        let err = HistoryReader::new().read_history(store.path()).unwrap_err();
        assert!(matches!(err, ClimoError::MalformedStore { .. }));
    }

    #[test]
    fn test_unparseable_row_is_malformed_store() {
        let store = write_store(
            "year,month,day,tmax,tmin\n\
             1987,7,not-a-day,21.5,11.0\n",
        );

        let err = HistoryReader::new().read_history(store.path()).unwrap_err();
        assert!(matches!(err, ClimoError::MalformedStore { .. }));
    }

    #[test]
    fn test_out_of_range_temperature_is_malformed_store() {
        let store = write_store(
            "year,month,day,tmax,tmin\n\
             1987,7,14,99.0,11.0\n",
        );

        let err = HistoryReader::new().read_history(store.path()).unwrap_err();
        assert!(matches!(err, ClimoError::MalformedStore { .. }));
    }
}
