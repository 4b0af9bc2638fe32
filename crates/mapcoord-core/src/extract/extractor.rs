//! Priority-ordered coordinate extractor.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::geo::Coordinate;
use crate::models::config::ExtractionConfig;

use super::rules::{
    BareAtMatcher, BracketedPairMatcher, ExtractionMatch, ExtractionMethod, MatcherKind,
    NullPrefixedMatcher, PairOrder, PatternMatcher, PlaceAtMatcher, PreciseMarkerMatcher, SecondaryMarkerMatcher,
};
use super::ExtractionResult;

/// A coordinate accepted by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// The accepted coordinate.
    pub coordinate: Coordinate,
    /// Pattern family reported to callers.
    pub method: ExtractionMethod,
    /// The specific matcher that fired.
    pub matcher: MatcherKind,
    /// Text the coordinate was read from.
    pub source: String,
}

/// Runs the matchers in fixed priority order and returns the first
/// candidate that passes validation. Results are never merged across
/// matchers.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateExtractor {
    /// Role assignment for ambiguous bracketed pairs.
    pair_order: PairOrder,
    /// Whether to reject (0,0) and the default map centre.
    reject_suspect: bool,
}

impl CoordinateExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            pair_order: PairOrder::default(),
            reject_suspect: true,
        }
    }

    /// Build from the extraction section of the config.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_pair_order(config.pair_order)
            .with_suspect_rejection(config.reject_suspect)
    }

    /// Set how ambiguous bracketed pairs are read.
    pub fn with_pair_order(mut self, order: PairOrder) -> Self {
        self.pair_order = order;
        self
    }

    /// Set placeholder rejection.
    pub fn with_suspect_rejection(mut self, reject: bool) -> Self {
        self.reject_suspect = reject;
        self
    }

    pub fn pair_order(&self) -> PairOrder {
        self.pair_order
    }

    /// First in-bounds candidate that is not a placeholder. With rejection
    /// off, a placeholder is taken only when nothing better exists.
    fn pick(
        &self,
        candidates: Vec<ExtractionMatch<Coordinate>>,
    ) -> Option<ExtractionMatch<Coordinate>> {
        let mut fallback = None;

        for candidate in candidates {
            if !candidate.value.is_in_bounds() {
                debug!("Rejected out-of-range {}", candidate.value);
                continue;
            }
            if !candidate.value.is_suspect() {
                return Some(candidate);
            }
            debug!("Skipped placeholder {}", candidate.value);
            if !self.reject_suspect && fallback.is_none() {
                fallback = Some(candidate);
            }
        }

        fallback
    }

    /// Scan `text` (a URL or fetched markup) for a coordinate.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let bracketed = BracketedPairMatcher::new(self.pair_order);
        let matchers: [&dyn PatternMatcher; 6] = [
            &PreciseMarkerMatcher,
            &PlaceAtMatcher,
            &bracketed,
            &SecondaryMarkerMatcher,
            &NullPrefixedMatcher,
            &BareAtMatcher,
        ];

        debug!("Extracting coordinates from {} characters of text", text.len());

        let mut matched_any = false;

        for matcher in matchers {
            if !matcher.applies_to(text) {
                trace!("Skipping {} matcher", matcher.kind().as_str());
                continue;
            }

            let candidates = matcher.candidates(text);
            if candidates.is_empty() {
                continue;
            }
            matched_any = true;

            if let Some(candidate) = self.pick(candidates) {
                let kind = matcher.kind();
                debug!(
                    "Accepted {} via {} ({})",
                    candidate.value,
                    kind.as_str(),
                    candidate.source
                );
                return Ok(Extraction {
                    coordinate: candidate.value,
                    method: kind.method(),
                    matcher: kind,
                    source: candidate.source,
                });
            }
        }

        if matched_any {
            Err(ExtractionError::AllCandidatesInvalid)
        } else {
            Err(ExtractionError::NoCoordinatesFound)
        }
    }
}

impl Default for CoordinateExtractor {
    fn default() -> Self {
        Self::new()
    }
}
