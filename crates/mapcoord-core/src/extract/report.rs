//! Flat success/failure record for JSON and CSV output.

use serde::{Deserialize, Serialize};

use super::{Extraction, ExtractionMethod, MatcherKind};
use crate::geo::Coordinate;

/// Serializable outcome of locating one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_used: Option<ExtractionMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<MatcherKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionReport {
    pub fn success(extraction: &Extraction) -> Self {
        Self {
            success: true,
            coordinates: Some(extraction.coordinate),
            method_used: Some(extraction.method),
            matcher: Some(extraction.matcher),
            error: None,
        }
    }

    pub fn failure(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            coordinates: None,
            method_used: None,
            matcher: None,
            error: Some(error.to_string()),
        }
    }

    pub fn from_result<E: std::fmt::Display>(result: &Result<Extraction, E>) -> Self {
        match result {
            Ok(extraction) => Self::success(extraction),
            Err(err) => Self::failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::extract::extract_coordinates;
    use serde_json::json;

    #[test]
    fn test_success_json_shape() {
        let result = extract_coordinates("!3d40.4280246!4d-3.6887462");
        let report = ExtractionReport::from_result(&result);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "success": true,
                "coordinates": { "lat": 40.4280246, "lng": -3.6887462 },
                "method_used": "precise-pattern",
                "matcher": "precise_marker"
            })
        );
    }

    #[test]
    fn test_failure_json_shape() {
        let result: Result<Extraction, ExtractionError> = Err(ExtractionError::NoCoordinatesFound);
        let report = ExtractionReport::from_result(&result);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({ "success": false, "error": "no coordinates found" })
        );
    }
}
