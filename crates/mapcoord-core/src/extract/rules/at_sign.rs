//! `@<lat>,<lng>,<zoom>` viewport patterns.
//!
//! The `@` triple is where the map is centred, which is usually but not
//! always the venue itself, so these rank below the precise marker.

use super::patterns::{BARE_AT, PLACE_AT, PLACE_SEGMENT};
use super::{match_from_captures, ExtractionMatch, MatcherKind, PatternMatcher};
use crate::geo::Coordinate;

/// First `@` triple after a `/place/` segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceAtMatcher;

impl PatternMatcher for PlaceAtMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::PlaceAt
    }

    fn applies_to(&self, text: &str) -> bool {
        PLACE_SEGMENT.is_match(text)
    }

    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>> {
        PLACE_AT
            .captures(text)
            .and_then(|caps| match_from_captures(&caps, Coordinate::new))
            .into_iter()
            .collect()
    }
}

/// Any `@` triple, used only when the text has no place segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct BareAtMatcher;

impl PatternMatcher for BareAtMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::BareAt
    }

    fn applies_to(&self, text: &str) -> bool {
        !PLACE_SEGMENT.is_match(text)
    }

    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>> {
        BARE_AT
            .captures_iter(text)
            .filter_map(|caps| match_from_captures(&caps, Coordinate::new))
            .collect()
    }
}
