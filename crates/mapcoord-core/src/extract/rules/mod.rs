//! Pattern matchers for coordinates embedded in map URLs and page markup.

pub mod arrays;
pub mod at_sign;
pub mod markers;
pub mod patterns;

pub use arrays::{BracketedPairMatcher, CandidatePair, PairOrder};
pub use at_sign::{BareAtMatcher, PlaceAtMatcher};
pub use markers::{NullPrefixedMatcher, PreciseMarkerMatcher, SecondaryMarkerMatcher};

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Identifier reported to callers for the pattern family that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionMethod {
    #[serde(rename = "precise-pattern")]
    PrecisePattern,
    #[serde(rename = "place-url-pattern")]
    PlaceUrlPattern,
    #[serde(rename = "general-fallback-pattern")]
    GeneralFallbackPattern,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::PrecisePattern => "precise-pattern",
            ExtractionMethod::PlaceUrlPattern => "place-url-pattern",
            ExtractionMethod::GeneralFallbackPattern => "general-fallback-pattern",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The individual matcher that produced a coordinate, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    /// `!3d<lat>!4d<lng>`
    PreciseMarker,
    /// `/place/...@<lat>,<lng>,`
    PlaceAt,
    /// `[<a>,<b>]` anywhere in the text
    BracketedPair,
    /// `[3,<lng>,<lat>]`
    SecondaryMarker,
    /// `null,null,<lat>,<lng>`
    NullPrefixed,
    /// `@<lat>,<lng>,` without a place segment
    BareAt,
}

impl MatcherKind {
    pub fn method(&self) -> ExtractionMethod {
        match self {
            MatcherKind::PreciseMarker => ExtractionMethod::PrecisePattern,
            MatcherKind::PlaceAt => ExtractionMethod::PlaceUrlPattern,
            MatcherKind::BracketedPair
            | MatcherKind::SecondaryMarker
            | MatcherKind::NullPrefixed
            | MatcherKind::BareAt => ExtractionMethod::GeneralFallbackPattern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatcherKind::PreciseMarker => "precise_marker",
            MatcherKind::PlaceAt => "place_at",
            MatcherKind::BracketedPair => "bracketed_pair",
            MatcherKind::SecondaryMarker => "secondary_marker",
            MatcherKind::NullPrefixed => "null_prefixed",
            MatcherKind::BareAt => "bare_at",
        }
    }
}

/// A pattern that proposes coordinates found in text.
pub trait PatternMatcher {
    /// Which matcher this is.
    fn kind(&self) -> MatcherKind;

    /// Whether the matcher should run on this text at all.
    fn applies_to(&self, _text: &str) -> bool {
        true
    }

    /// Candidate coordinates in the order they should be tried.
    ///
    /// Candidates are not validated; tokens that fail to parse are skipped.
    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>>;
}

/// A value matched in source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Parse a numeric token, skipping anything `f64` cannot represent.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build a match from a two-number capture, assigning roles with `build`.
pub(crate) fn match_from_captures(
    caps: &regex::Captures<'_>,
    build: impl Fn(f64, f64) -> Coordinate,
) -> Option<ExtractionMatch<Coordinate>> {
    let first = parse_number(caps.get(1)?.as_str())?;
    let second = parse_number(caps.get(2)?.as_str())?;
    let full = caps.get(0)?;

    Some(
        ExtractionMatch::new(build(first, second), full.as_str())
            .with_position(full.start(), full.end()),
    )
}
