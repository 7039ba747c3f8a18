/// Percentile window defaults
pub const DEFAULT_WINDOW_HALF_WIDTH: i64 = 7;

/// Classification sentinel bounds (degrees Celsius)
pub const CLASSIFY_LOWER_BOUND: f64 = -100.0;
pub const CLASSIFY_UPPER_BOUND: f64 = 100.0;

/// Data directory layout
pub const STATIONS_FILE: &str = "stations.json";
pub const OBSERVATIONS_DIR: &str = "observations";
pub const HISTORY_DIR: &str = "history";
pub const HEATMAP_DIR: &str = "heatmap";

/// Output directory layout
pub const RESULTS_DIR: &str = "results";
pub const GRIDS_DIR: &str = "grids";

/// Temperature sanity bounds (degrees Celsius)
pub const MIN_VALID_TEMP: f64 = -90.0;
pub const MAX_VALID_TEMP: f64 = 60.0;

/// Reader defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
