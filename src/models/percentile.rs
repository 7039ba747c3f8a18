use serde::{Deserialize, Serialize};

/// The three variables the percentile engine treats independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Tmax,
    Tmin,
    Tavg,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::Tmax, Variable::Tmin, Variable::Tavg];

    pub fn name(&self) -> &'static str {
        match self {
            Variable::Tmax => "Tmax",
            Variable::Tmin => "Tmin",
            Variable::Tavg => "Tavg",
        }
    }
}

/// Cutpoints for one variable at the fixed quantile sequence
/// [5, 10, 40, 50, 60, 90, 95]. Non-decreasing by construction of the
/// quantile estimator over a sorted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableCutpoints {
    pub p5: f64,
    pub p10: f64,
    pub p40: f64,
    pub p50: f64,
    pub p60: f64,
    pub p90: f64,
    pub p95: f64,
}

impl VariableCutpoints {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.p5, self.p10, self.p40, self.p50, self.p60, self.p90, self.p95,
        ]
    }

    pub fn is_monotonic(&self) -> bool {
        self.as_array().windows(2).all(|w| w[0] <= w[1])
    }

    /// Quantile label as published, e.g. "40%".
    pub fn labelled(&self) -> [(&'static str, f64); 7] {
        [
            ("5%", self.p5),
            ("10%", self.p10),
            ("40%", self.p40),
            ("50%", self.p50),
            ("60%", self.p60),
            ("90%", self.p90),
            ("95%", self.p95),
        ]
    }
}

/// The climatological baseline for one station and one calendar window:
/// per-variable cutpoints at the fixed quantile sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    pub tmax: VariableCutpoints,
    pub tmin: VariableCutpoints,
    pub tavg: VariableCutpoints,
}

impl PercentileTable {
    pub fn cutpoints(&self, variable: Variable) -> &VariableCutpoints {
        match variable {
            Variable::Tmax => &self.tmax,
            Variable::Tmin => &self.tmin,
            Variable::Tavg => &self.tavg,
        }
    }
}
