use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One persisted day of percentile history. At most one row per date within
/// a (station, year) store; a missing percentile is never written, the
/// Option exists for in-memory hand-off only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub date: NaiveDate,
    pub percentile: Option<u8>,
}

impl HeatmapRow {
    pub fn new(date: NaiveDate, percentile: Option<u8>) -> Self {
        Self { date, percentile }
    }
}

pub const GRID_DAYS: usize = 31;
pub const GRID_MONTHS: usize = 12;

/// Dense day-of-month x month matrix for one year, the sole interface to
/// the external renderer. Cells without a stored row stay empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub year: i32,
    pub cells: Vec<Vec<Option<u8>>>,
}

impl HeatmapGrid {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            cells: vec![vec![None; GRID_MONTHS]; GRID_DAYS],
        }
    }

    /// Populate the grid from stored rows, ignoring rows of other years.
    pub fn from_rows(year: i32, rows: &[HeatmapRow]) -> Self {
        let mut grid = Self::empty(year);

        for row in rows {
            if row.date.year() != year {
                continue;
            }
            let day = row.date.day() as usize;
            let month = row.date.month() as usize;
            grid.cells[day - 1][month - 1] = row.percentile;
        }

        grid
    }

    /// Cell lookup by calendar day and month, both 1-based.
    pub fn cell(&self, day: u32, month: u32) -> Option<u8> {
        self.cells
            .get(day as usize - 1)
            .and_then(|r| r.get(month as usize - 1))
            .copied()
            .flatten()
    }

    pub fn populated_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| c.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = HeatmapGrid::empty(2024);
        assert_eq!(grid.cells.len(), 31);
        assert!(grid.cells.iter().all(|row| row.len() == 12));
        assert_eq!(grid.populated_count(), 0);
    }

    #[test]
    fn test_grid_population_is_exact() {
        let rows = vec![
            HeatmapRow::new(date(2024, 3, 1), Some(10)),
            HeatmapRow::new(date(2024, 3, 15), Some(50)),
            HeatmapRow::new(date(2024, 3, 31), Some(90)),
        ];
        let grid = HeatmapGrid::from_rows(2024, &rows);

        assert_eq!(grid.cell(1, 3), Some(10));
        assert_eq!(grid.cell(15, 3), Some(50));
        assert_eq!(grid.cell(31, 3), Some(90));
        assert_eq!(grid.populated_count(), 3);

        // Everything else in month 3, and all other months, stays empty
        assert_eq!(grid.cell(2, 3), None);
        assert_eq!(grid.cell(15, 4), None);
        assert_eq!(grid.cell(15, 2), None);
    }

    #[test]
    fn test_grid_ignores_other_years() {
        let rows = vec![
            HeatmapRow::new(date(2023, 6, 10), Some(75)),
            HeatmapRow::new(date(2024, 6, 10), Some(25)),
        ];
        let grid = HeatmapGrid::from_rows(2024, &rows);
        assert_eq!(grid.cell(10, 6), Some(25));
        assert_eq!(grid.populated_count(), 1);
    }
}
