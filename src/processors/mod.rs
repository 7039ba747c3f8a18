pub mod batch_processor;
pub mod station_processor;

pub use batch_processor::{BatchProcessor, StationOutcome};
pub use station_processor::{StationContext, StationOutput, StationProcessor};
