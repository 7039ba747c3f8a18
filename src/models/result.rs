use serde::{Deserialize, Serialize};

use crate::models::ClassificationBin;

/// The per-station record handed to downstream consumers. Every field that
/// can be unavailable is an Option serialized as an explicit null, so a
/// public-facing consumer can degrade gracefully instead of dropping the
/// station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationResult {
    pub station_name: String,
    pub station_label: String,
    pub record_span: String,
    pub category: Option<ClassificationBin>,
    pub answer: Option<String>,
    pub comment: Option<String>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub current_average: Option<f64>,
    pub average_percent: Option<u8>,
}

impl StationResult {
    /// Degraded record for a station whose current observation never
    /// arrived: identity fields only, everything else an explicit null.
    pub fn unavailable(station_name: String, station_label: String, record_span: String) -> Self {
        Self {
            station_name,
            station_label,
            record_span,
            category: None,
            answer: None,
            comment: None,
            maximum: None,
            minimum: None,
            current_average: None,
            average_percent: None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.category.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_serializes_nulls() {
        let result = StationResult::unavailable(
            "Helsinki Kaisaniemi".to_string(),
            "Helsinki".to_string(),
            "1959-2024".to_string(),
        );
        assert!(!result.is_classified());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["answer"].is_null());
        assert!(json["average_percent"].is_null());
        assert_eq!(json["station_label"], "Helsinki");
    }

    #[test]
    fn test_classified_round_trip() {
        let result = StationResult {
            station_name: "Test".to_string(),
            station_label: "Test".to_string(),
            record_span: "2000-2024".to_string(),
            category: Some(ClassificationBin::Hot),
            answer: Some(ClassificationBin::Hot.answer().to_string()),
            comment: Some(ClassificationBin::Hot.comment().to_string()),
            maximum: Some(27.5),
            minimum: Some(14.0),
            current_average: Some(20.75),
            average_percent: Some(83),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: StationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.category, Some(ClassificationBin::Hot));
    }
}
