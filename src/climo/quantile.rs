use crate::error::{ClimoError, Result};
use crate::models::{HistoricalObservation, PercentileTable, Variable, VariableCutpoints};

/// The fixed quantile sequence the baseline is published at.
pub const QUANTILES: [f64; 7] = [0.05, 0.10, 0.40, 0.50, 0.60, 0.90, 0.95];

/// Minimum usable samples per variable after missing-value exclusion.
pub const MIN_SAMPLES: usize = 2;

/// Linear-interpolation quantile (type 7) over a sorted sample: the
/// fractional order statistic at h = (n - 1) * q. Reproducible bit-for-bit
/// for identical input.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    debug_assert!(n >= 1);
    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;

    if lo + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    }
}

/// Extract the non-missing sample for one variable. Missing observations
/// are excluded from the sample, never zero-filled.
fn sample_for(variable: Variable, window: &[&HistoricalObservation]) -> Vec<f64> {
    let mut sample: Vec<f64> = window
        .iter()
        .filter_map(|obs| match variable {
            Variable::Tmax => obs.tmax,
            Variable::Tmin => obs.tmin,
            Variable::Tavg => obs.tavg,
        })
        .filter(|v| !v.is_nan())
        .collect();

    sample.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    sample
}

fn cutpoints_for(variable: Variable, window: &[&HistoricalObservation]) -> Result<VariableCutpoints> {
    let sample = sample_for(variable, window);
    if sample.len() < MIN_SAMPLES {
        return Err(ClimoError::insufficient_data(variable.name(), sample.len()));
    }

    Ok(VariableCutpoints {
        p5: quantile_sorted(&sample, QUANTILES[0]),
        p10: quantile_sorted(&sample, QUANTILES[1]),
        p40: quantile_sorted(&sample, QUANTILES[2]),
        p50: quantile_sorted(&sample, QUANTILES[3]),
        p60: quantile_sorted(&sample, QUANTILES[4]),
        p90: quantile_sorted(&sample, QUANTILES[5]),
        p95: quantile_sorted(&sample, QUANTILES[6]),
    })
}

/// Build the full percentile table for a selected window, each variable
/// computed independently over its own non-missing sample.
pub fn build_table(window: &[&HistoricalObservation]) -> Result<PercentileTable> {
    Ok(PercentileTable {
        tmax: cutpoints_for(Variable::Tmax, window)?,
        tmin: cutpoints_for(Variable::Tmin, window)?,
        tavg: cutpoints_for(Variable::Tavg, window)?,
    })
}

/// Empirical percentile of today's value against the station's full
/// historical sample for the variable, with the value itself appended to
/// the series the way it is for plotting: the CDF step count over the
/// augmented sample, scaled to 0-100 and rounded to the nearest whole
/// percent.
pub fn empirical_percent(sample: &[f64], value: f64) -> Option<u8> {
    if value.is_nan() {
        return None;
    }

    let clean: Vec<f64> = sample.iter().copied().filter(|v| !v.is_nan()).collect();
    let n = clean.len() + 1;
    let at_or_below = clean.iter().filter(|&&v| v <= value).count() + 1;

    let percent = (100.0 * at_or_below as f64 / n as f64).round();
    Some(percent as u8)
}
