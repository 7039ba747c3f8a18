use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ClimoError, Result};

/// A raw feed row as deposited by the external collector. Feeds come in two
/// shapes: daily summaries with the day's extremes, or sub-daily readings
/// that must be aggregated before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    Daily {
        date: NaiveDate,
        tmax: Option<f64>,
        tmin: Option<f64>,
    },
    SubDaily {
        timestamp: NaiveDateTime,
        air_temp: f64,
    },
}

impl Observation {
    /// Calendar date the reading belongs to.
    pub fn date(&self) -> NaiveDate {
        match self {
            Observation::Daily { date, .. } => *date,
            Observation::SubDaily { timestamp, .. } => timestamp.date(),
        }
    }
}

/// Today's conditions for one station after feed aggregation. Either extreme
/// may be missing; Tavg exists only when both do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
}

impl CurrentConditions {
    pub fn new(tmax: Option<f64>, tmin: Option<f64>) -> Self {
        Self { tmax, tmin }
    }

    /// Missing feed file, or no rows for the target date.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Mean of the day's extremes, the headline comparison statistic.
    pub fn tavg(&self) -> Option<f64> {
        match (self.tmax, self.tmin) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.tmax.is_none() && self.tmin.is_none()
    }

    /// Aggregate sub-daily readings for one date into daily extremes.
    pub fn from_sub_daily(date: NaiveDate, observations: &[Observation]) -> Self {
        let mut tmax: Option<f64> = None;
        let mut tmin: Option<f64> = None;

        for obs in observations {
            if let Observation::SubDaily { timestamp, air_temp } = obs {
                if timestamp.date() != date || air_temp.is_nan() {
                    continue;
                }
                tmax = Some(tmax.map_or(*air_temp, |t: f64| t.max(*air_temp)));
                tmin = Some(tmin.map_or(*air_temp, |t: f64| t.min(*air_temp)));
            }
        }

        Self { tmax, tmin }
    }
}

/// One day of a station's historical record. Tavg is derived at load time
/// when both extremes are present, never from partial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalObservation {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub date: NaiveDate,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
}

impl HistoricalObservation {
    pub fn new(year: i32, month: u32, day: u32, tmax: Option<f64>, tmin: Option<f64>) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ClimoError::InvalidFormat(format!("Invalid calendar date: {}-{}-{}", year, month, day))
        })?;

        let tavg = match (tmax, tmin) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        };

        Ok(Self {
            year,
            month,
            day,
            date,
            tmax,
            tmin,
            tavg,
        })
    }

    pub fn has_complete_extremes(&self) -> bool {
        self.tmax.is_some() && self.tmin.is_some()
    }
}
