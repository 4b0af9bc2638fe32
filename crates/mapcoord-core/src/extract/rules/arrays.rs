//! Bracketed `[<a>,<b>]` number pairs scattered through page markup.
//!
//! A bare pair does not say which number is the latitude. Magnitude settles
//! it when one value exceeds 90; otherwise the configured [`PairOrder`]
//! decides. The default, [`PairOrder::LngLat`], reads the first number as
//! longitude, matching the GeoJSON-style arrays map pages usually embed.
//! It is a guess, so callers that know their source can override it.

use serde::{Deserialize, Serialize};

use super::patterns::BRACKETED_PAIR;
use super::{parse_number, ExtractionMatch, MatcherKind, PatternMatcher};
use crate::geo::Coordinate;

/// Role assignment for pairs whose magnitudes cannot disambiguate them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairOrder {
    /// First number is longitude, second latitude.
    #[default]
    LngLat,
    /// First number is latitude, second longitude.
    LatLng,
}

/// Two numbers found together with no fixed roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePair {
    pub first: f64,
    pub second: f64,
}

impl CandidatePair {
    pub fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }

    /// Assign latitude and longitude.
    ///
    /// A value above 90 in magnitude cannot be a latitude, so when exactly
    /// one side is both above 90 and the larger of the two it becomes the
    /// longitude. Everything else falls back to `default`.
    pub fn orient(&self, default: PairOrder) -> Coordinate {
        let (a, b) = (self.first.abs(), self.second.abs());

        if a > 90.0 && a > b {
            Coordinate::new(self.second, self.first)
        } else if b > 90.0 && b > a {
            Coordinate::new(self.first, self.second)
        } else {
            match default {
                PairOrder::LngLat => Coordinate::new(self.second, self.first),
                PairOrder::LatLng => Coordinate::new(self.first, self.second),
            }
        }
    }
}

/// Collects every bracketed pair in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketedPairMatcher {
    order: PairOrder,
}

impl BracketedPairMatcher {
    pub fn new(order: PairOrder) -> Self {
        Self { order }
    }

    /// Raw pairs before orientation.
    pub fn pairs(&self, text: &str) -> Vec<ExtractionMatch<CandidatePair>> {
        BRACKETED_PAIR
            .captures_iter(text)
            .filter_map(|caps| {
                let first = parse_number(&caps[1])?;
                let second = parse_number(&caps[2])?;
                let full = caps.get(0)?;
                Some(
                    ExtractionMatch::new(CandidatePair::new(first, second), full.as_str())
                        .with_position(full.start(), full.end()),
                )
            })
            .collect()
    }
}

impl PatternMatcher for BracketedPairMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::BracketedPair
    }

    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>> {
        self.pairs(text)
            .into_iter()
            .map(|m| ExtractionMatch {
                value: m.value.orient(self.order),
                position: m.position,
                source: m.source,
            })
            .collect()
    }
}
