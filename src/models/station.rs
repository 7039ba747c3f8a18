use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ClimoError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationConfig {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub label: String,

    /// Fixed UTC offset, e.g. "+02:00" or "-07:00". Fixed offsets have no
    /// DST transitions, so the station's calendar date is unambiguous.
    pub timezone: String,

    pub record_start: NaiveDate,
    pub record_end: NaiveDate,
}

impl StationConfig {
    pub fn new(
        id: String,
        name: String,
        label: String,
        timezone: String,
        record_start: NaiveDate,
        record_end: NaiveDate,
    ) -> Self {
        Self {
            id,
            name,
            label,
            timezone,
            record_start,
            record_end,
        }
    }

    /// Parse the configured offset, failing with a date-alignment error so
    /// the station is skipped rather than silently classified in UTC.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.timezone).ok_or_else(|| ClimoError::DateAlignment {
            station_id: self.id.clone(),
            message: format!("unparseable UTC offset '{}'", self.timezone),
        })
    }

    /// The station's current calendar date in its local time.
    pub fn local_today(&self) -> Result<NaiveDate> {
        let offset = self.utc_offset()?;
        Ok(Utc::now().with_timezone(&offset).date_naive())
    }

    /// Display span of the historical record, e.g. "1959-2024".
    pub fn record_span(&self) -> String {
        format!(
            "{}-{}",
            self.record_start.format("%Y"),
            self.record_end.format("%Y")
        )
    }
}

/// Accepts "+HH:MM", "-HH:MM" and "Z".
fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    if s == "Z" || s == "z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match s.bytes().next()? {
        b'+' => (1i32, &s[1..]),
        b'-' => (-1i32, &s[1..]),
        _ => return None,
    };

    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(tz: &str) -> StationConfig {
        StationConfig::new(
            "helsinki-kaisaniemi".to_string(),
            "Helsinki Kaisaniemi".to_string(),
            "Helsinki".to_string(),
            tz.to_string(),
            NaiveDate::from_ymd_opt(1959, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_offset_parsing() {
        assert_eq!(
            station("+02:00").utc_offset().unwrap(),
            FixedOffset::east_opt(7200).unwrap()
        );
        assert_eq!(
            station("-07:00").utc_offset().unwrap(),
            FixedOffset::west_opt(7 * 3600).unwrap()
        );
        assert_eq!(
            station("Z").utc_offset().unwrap(),
            FixedOffset::east_opt(0).unwrap()
        );
    }

    #[test]
    fn test_malformed_offset_is_date_alignment_error() {
        let err = station("Europe/Helsinki").utc_offset().unwrap_err();
        assert!(matches!(err, ClimoError::DateAlignment { .. }));

        assert!(station("+15:00").utc_offset().is_err());
        assert!(station("02:00").utc_offset().is_err());
    }

    #[test]
    fn test_record_span() {
        assert_eq!(station("+02:00").record_span(), "1959-2024");
    }

    #[test]
    fn test_config_validation() {
        assert!(station("+02:00").validate().is_ok());

        let mut bad = station("+02:00");
        bad.id = String::new();
        assert!(bad.validate().is_err());
    }
}
