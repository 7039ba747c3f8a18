pub mod classifier;
pub mod quantile;
pub mod window;

pub use classifier::{breakpoints, classify};
pub use quantile::{build_table, empirical_percent, MIN_SAMPLES, QUANTILES};
pub use window::select_window;
