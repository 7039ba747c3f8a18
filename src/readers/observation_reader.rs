use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::{ClimoError, Result};
use crate::models::{CurrentConditions, Observation};

#[derive(Debug, Deserialize)]
struct DailyRow {
    date: NaiveDate,
    tmax: Option<f64>,
    tmin: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SubDailyRow {
    timestamp: NaiveDateTime,
    air_temp: f64,
}

/// Which of the two collector feed shapes a file carries, decided from its
/// CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedShape {
    Daily,
    SubDaily,
}

pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read today's conditions for one station from its feed file. An
    /// absent feed, or a feed with no rows for the target date, yields
    /// all-missing conditions rather than an error; the collector owns
    /// feed availability.
    pub fn read_current(&self, path: &Path, target: NaiveDate) -> Result<CurrentConditions> {
        if !path.exists() {
            return Ok(CurrentConditions::missing());
        }

        let observations = self.read_observations(path)?;

        // Daily rows win when present for the date; otherwise aggregate
        // the day's sub-daily readings
        for obs in &observations {
            if let Observation::Daily { date, tmax, tmin } = obs {
                if *date == target {
                    return Ok(CurrentConditions::new(*tmax, *tmin));
                }
            }
        }

        Ok(CurrentConditions::from_sub_daily(target, &observations))
    }

    /// Parse the whole feed into typed observations.
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let shape = self.detect_shape(path, &mut csv_reader)?;
        let mut observations = Vec::new();

        match shape {
            FeedShape::Daily => {
                for row in csv_reader.deserialize::<DailyRow>() {
                    let row = row.map_err(|e| {
                        ClimoError::InvalidFormat(format!(
                            "{}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    observations.push(Observation::Daily {
                        date: row.date,
                        tmax: row.tmax,
                        tmin: row.tmin,
                    });
                }
            }
            FeedShape::SubDaily => {
                for row in csv_reader.deserialize::<SubDailyRow>() {
                    let row = row.map_err(|e| {
                        ClimoError::InvalidFormat(format!(
                            "{}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    observations.push(Observation::SubDaily {
                        timestamp: row.timestamp,
                        air_temp: row.air_temp,
                    });
                }
            }
        }

        Ok(observations)
    }

    fn detect_shape<R: std::io::Read>(
        &self,
        path: &Path,
        csv_reader: &mut csv::Reader<R>,
    ) -> Result<FeedShape> {
        let headers = csv_reader.headers().map_err(|e| {
            ClimoError::InvalidFormat(format!("{}: {}", path.display(), e))
        })?;

        let has = |name: &str| headers.iter().any(|h| h == name);

        if has("timestamp") && has("air_temp") {
            Ok(FeedShape::SubDaily)
        } else if has("date") && has("tmax") && has("tmin") {
            Ok(FeedShape::Daily)
        } else {
            Err(ClimoError::InvalidFormat(format!(
                "{}: unrecognized feed header {:?}",
                path.display(),
                headers
            )))
        }
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
