pub mod category;
pub mod heatmap;
pub mod observation;
pub mod percentile;
pub mod result;
pub mod station;

pub use category::ClassificationBin;
pub use heatmap::{HeatmapGrid, HeatmapRow};
pub use observation::{CurrentConditions, HistoricalObservation, Observation};
pub use percentile::{PercentileTable, Variable, VariableCutpoints};
pub use result::StationResult;
pub use station::StationConfig;
