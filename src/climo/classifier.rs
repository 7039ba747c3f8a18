use crate::error::{ClimoError, Result};
use crate::models::{ClassificationBin, PercentileTable};
use crate::utils::constants::{CLASSIFY_LOWER_BOUND, CLASSIFY_UPPER_BOUND};

/// Classify today's Tavg against the climatological baseline.
///
/// The break vector is [-100, p5, p10, p40, p60, p90, p95, 100] over the
/// Tavg cutpoints. The median stays out of the breaks on purpose: six
/// cutpoints make seven bins, while the 50% value remains in the table for
/// display. Intervals are half-open and left-closed, so a Tavg exactly on a
/// cutpoint belongs to the bin that starts there; the sentinels make the
/// mapping total for any physical temperature.
pub fn classify(tavg: Option<f64>, table: &PercentileTable) -> Result<ClassificationBin> {
    let tavg = tavg.ok_or(ClimoError::MissingCurrentObservation)?;
    if tavg.is_nan() {
        return Err(ClimoError::MissingCurrentObservation);
    }

    let breaks = breakpoints(table);
    let at_or_below = breaks.iter().filter(|&&b| b <= tavg).count();
    let index = at_or_below.saturating_sub(1).min(ClassificationBin::ALL.len() - 1);

    // Exhaustive by construction: index is clamped to 0..=6
    Ok(ClassificationBin::from_index(index).unwrap_or(ClassificationBin::BloodyCold))
}

/// The six working cutpoints plus the sentinel bounds.
pub fn breakpoints(table: &PercentileTable) -> [f64; 8] {
    let c = &table.tavg;
    [
        CLASSIFY_LOWER_BOUND,
        c.p5,
        c.p10,
        c.p40,
        c.p60,
        c.p90,
        c.p95,
        CLASSIFY_UPPER_BOUND,
    ]
}
