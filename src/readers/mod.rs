pub mod history_reader;
pub mod observation_reader;
pub mod station_reader;

pub use history_reader::HistoryReader;
pub use observation_reader::ObservationReader;
pub use station_reader::StationReader;
