//! Coordinate extraction from map URLs and page markup.

mod extractor;
mod report;
pub mod rules;

pub use extractor::{CoordinateExtractor, Extraction};
pub use report::ExtractionReport;
pub use rules::{CandidatePair, ExtractionMethod, MatcherKind, PairOrder};

use crate::error::ExtractionError;

/// Outcome of scanning one piece of text.
pub type ExtractionResult = std::result::Result<Extraction, ExtractionError>;

/// Extract coordinates with the default extractor settings.
pub fn extract_coordinates(text: &str) -> ExtractionResult {
    CoordinateExtractor::new().extract(text)
}
