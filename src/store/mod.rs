pub mod heatmap_store;

pub use heatmap_store::{reconcile, HeatmapStore};
