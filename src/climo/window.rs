use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{ClimoError, Result};
use crate::models::HistoricalObservation;

/// Selects the climatology sample for a target date: every historical day
/// whose (month, day) lies within `half_width` days of the target's, pooled
/// across all years of the record.
///
/// Membership is decided on calendar (month, day) alone, so the window
/// wraps correctly across the year boundary (Jan 3 with half_width 7 picks
/// up late-December days) and a Feb 29 row simply matches whenever the
/// window spans Feb 29.
pub fn select_window(
    target: NaiveDate,
    half_width: i64,
    records: &[HistoricalObservation],
) -> Result<Vec<&HistoricalObservation>> {
    let start = target - Duration::days(half_width);
    let end = target + Duration::days(half_width);
    let in_window = calendar_window(start, end);

    let selected: Vec<&HistoricalObservation> = records
        .iter()
        .filter(|obs| in_window(obs.month, obs.day))
        .collect();

    if selected.is_empty() {
        return Err(ClimoError::insufficient_data(
            format!("window around {}", target.format("%m-%d")),
            0,
        ));
    }

    Ok(selected)
}

/// Calendar (month, day) membership predicate for the span [start, end].
/// When the span crosses the year boundary the start month is greater than
/// the end month and the acceptance region wraps around.
fn calendar_window(start: NaiveDate, end: NaiveDate) -> impl Fn(u32, u32) -> bool {
    let start_month = start.month();
    let start_day = start.day();
    let end_month = end.month();
    let end_day = end.day();

    move |month: u32, day: u32| -> bool {
        if start_month < end_month {
            (month == start_month && day >= start_day)
                || (month == end_month && day <= end_day)
                || (month > start_month && month < end_month)
        } else if start_month == end_month {
            day >= start_day && day <= end_day
        } else {
            (month == start_month && day >= start_day)
                || (month == end_month && day <= end_day)
                || (month > start_month || month < end_month)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(dates: &[(i32, u32, u32)]) -> Vec<HistoricalObservation> {
        dates
            .iter()
            .map(|&(y, m, d)| HistoricalObservation::new(y, m, d, Some(10.0), Some(0.0)).unwrap())
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mid_year_window() {
        // Jul 15 with half_width 7 accepts Jul 8 ..= Jul 22 in any year
        let records = record(&[
            (2000, 7, 8),
            (2001, 7, 15),
            (2002, 7, 22),
            (2003, 7, 7),  // outside
            (2004, 7, 23), // outside
        ]);

        let selected = select_window(date(2024, 7, 15), 7, &records).unwrap();
        let months_days: Vec<(u32, u32)> = selected.iter().map(|o| (o.month, o.day)).collect();
        assert_eq!(months_days, vec![(7, 8), (7, 15), (7, 22)]);
    }

    #[test]
    fn test_wraparound_into_december() {
        let records = record(&[
            (1999, 12, 27),
            (2000, 12, 31),
            (2001, 1, 1),
            (2002, 1, 10),
            (2003, 12, 26), // outside: window is Dec 27 ..= Jan 10
            (2004, 1, 11),  // outside
        ]);

        let selected = select_window(date(2024, 1, 3), 7, &records).unwrap();
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|o| {
            (o.month == 12 && o.day >= 27) || (o.month == 1 && o.day <= 10)
        }));
    }

    #[test]
    fn test_wraparound_into_january() {
        let records = record(&[(2000, 1, 2), (2001, 12, 29), (2002, 6, 15)]);
        let selected = select_window(date(2024, 12, 29), 7, &records).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_leap_day_target_in_common_year_record() {
        // Window centred near Feb 29 must still select from years without one.
        let records = record(&[(2021, 2, 25), (2022, 3, 3), (2023, 2, 22)]);
        let selected = select_window(date(2024, 2, 29), 7, &records).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_leap_day_rows_match_spanning_window() {
        let records = record(&[(2020, 2, 29), (2024, 2, 29)]);
        let selected = select_window(date(2023, 3, 3), 7, &records).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_empty_selection_is_insufficient_data() {
        let records = record(&[(2000, 7, 15)]);
        let err = select_window(date(2024, 1, 15), 7, &records).unwrap_err();
        assert!(matches!(err, ClimoError::InsufficientData { .. }));
    }

    #[test]
    fn test_determinism() {
        let records = record(&[(2000, 7, 7), (2001, 7, 15), (2002, 7, 23)]);
        let a = select_window(date(2024, 7, 15), 7, &records).unwrap();
        let b = select_window(date(2024, 7, 15), 7, &records).unwrap();
        assert_eq!(a, b);
    }
}
