use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClimoError>;

#[derive(Error, Debug)]
pub enum ClimoError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Insufficient data for {context}: {samples} usable samples")]
    InsufficientData { context: String, samples: usize },

    #[error("Current observation is missing")]
    MissingCurrentObservation,

    #[error("Malformed store {path}: {message}")]
    MalformedStore { path: String, message: String },

    #[error("Date alignment error for station {station_id}: {message}")]
    DateAlignment { station_id: String, message: String },

    #[error("Station {station_id} not found")]
    StationNotFound { station_id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ClimoError {
    pub fn insufficient_data(context: impl Into<String>, samples: usize) -> Self {
        ClimoError::InsufficientData {
            context: context.into(),
            samples,
        }
    }

    pub fn malformed_store(path: impl Into<String>, message: impl Into<String>) -> Self {
        ClimoError::MalformedStore {
            path: path.into(),
            message: message.into(),
        }
    }
}
