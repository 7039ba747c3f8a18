use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use validator::Validate;

use crate::error::{ClimoError, Result};
use crate::models::StationConfig;

pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the ordered station list from stations.json, validating each
    /// entry and rejecting duplicate ids.
    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationConfig>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let stations: Vec<StationConfig> = serde_json::from_reader(reader)?;

        let mut seen = HashSet::new();
        for station in &stations {
            station.validate()?;

            if station.record_start > station.record_end {
                return Err(ClimoError::Config(format!(
                    "Station {}: record_start {} after record_end {}",
                    station.id, station.record_start, station.record_end
                )));
            }

            if !seen.insert(station.id.clone()) {
                return Err(ClimoError::Config(format!(
                    "Duplicate station id: {}",
                    station.id
                )));
            }
        }

        Ok(stations)
    }

    /// Look up a single station by id, preserving list order semantics.
    pub fn read_station(&self, path: &Path, station_id: &str) -> Result<StationConfig> {
        self.read_stations(path)?
            .into_iter()
            .find(|s| s.id == station_id)
            .ok_or_else(|| ClimoError::StationNotFound {
                station_id: station_id.to_string(),
            })
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const STATIONS: &str = r#"[
        {
            "id": "helsinki-kaisaniemi",
            "name": "Helsinki Kaisaniemi",
            "label": "Helsinki",
            "timezone": "+02:00",
            "record_start": "1959-01-01",
            "record_end": "2024-12-31"
        },
        {
            "id": "sodankyla-tahtela",
            "name": "Sodankyla Tahtela",
            "label": "Sodankyla",
            "timezone": "+02:00",
            "record_start": "1908-01-01",
            "record_end": "2024-12-31"
        }
    ]"#;

    #[test]
    fn test_read_stations_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(STATIONS.as_bytes())?;

        let reader = StationReader::new();
        let stations = reader.read_stations(temp_file.path())?;

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "helsinki-kaisaniemi");
        assert_eq!(stations[0].record_span(), "1959-2024");
        assert_eq!(stations[1].label, "Sodankyla");

        Ok(())
    }

    #[test]
    fn test_read_single_station() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(STATIONS.as_bytes())?;

        let reader = StationReader::new();
        let station = reader.read_station(temp_file.path(), "sodankyla-tahtela")?;
        assert_eq!(station.name, "Sodankyla Tahtela");

        let missing = reader.read_station(temp_file.path(), "nowhere");
        assert!(matches!(missing, Err(ClimoError::StationNotFound { .. })));

        Ok(())
    }

    #[test]
    fn test_duplicate_ids_rejected() -> Result<()> {
        let duplicated = STATIONS.replace("sodankyla-tahtela", "helsinki-kaisaniemi");
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(duplicated.as_bytes())?;

        let reader = StationReader::new();
        assert!(matches!(
            reader.read_stations(temp_file.path()),
            Err(ClimoError::Config(_))
        ));

        Ok(())
    }

    #[test]
    fn test_inverted_record_span_rejected() -> Result<()> {
        let inverted = STATIONS.replace("\"record_start\": \"1959-01-01\"", "\"record_start\": \"2030-01-01\"");
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(inverted.as_bytes())?;

        let reader = StationReader::new();
        assert!(reader.read_stations(temp_file.path()).is_err());

        Ok(())
    }
}
