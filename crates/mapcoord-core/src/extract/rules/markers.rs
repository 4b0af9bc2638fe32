//! Matchers whose surrounding markers fix the latitude/longitude roles.

use super::patterns::{NULL_PREFIXED, PRECISE_MARKER, SECONDARY_MARKER};
use super::{match_from_captures, ExtractionMatch, MatcherKind, PatternMatcher};
use crate::geo::Coordinate;

/// `!3d<lat>!4d<lng>`, the pin location encoded in a place URL's data blob.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseMarkerMatcher;

impl PatternMatcher for PreciseMarkerMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::PreciseMarker
    }

    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>> {
        PRECISE_MARKER
            .captures_iter(text)
            .filter_map(|caps| match_from_captures(&caps, Coordinate::new))
            .collect()
    }
}

/// `[3,<lng>,<lat>]`, where the leading 3 tags a point array.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondaryMarkerMatcher;

impl PatternMatcher for SecondaryMarkerMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::SecondaryMarker
    }

    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>> {
        SECONDARY_MARKER
            .captures_iter(text)
            .filter_map(|caps| match_from_captures(&caps, |lng, lat| Coordinate::new(lat, lng)))
            .collect()
    }
}

/// `null,null,<lat>,<lng>` as found in serialized page state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPrefixedMatcher;

impl PatternMatcher for NullPrefixedMatcher {
    fn kind(&self) -> MatcherKind {
        MatcherKind::NullPrefixed
    }

    fn candidates(&self, text: &str) -> Vec<ExtractionMatch<Coordinate>> {
        NULL_PREFIXED
            .captures_iter(text)
            .filter_map(|caps| match_from_captures(&caps, Coordinate::new))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precise_marker() {
        let text = "data=!3m1!4b1!4m6!3m5!1s0x0:0x0!8m2!3d40.4280246!4d-3.6887462!16s%2Fg";
        let found = PreciseMarkerMatcher.candidates(text);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, Coordinate::new(40.4280246, -3.6887462));
        assert_eq!(found[0].source, "!3d40.4280246!4d-3.6887462");
    }

    #[test]
    fn test_every_marker_is_a_candidate() {
        let found = PreciseMarkerMatcher.candidates("!3d0!4d0 !3d40.5!4d-3.5");
        let values: Vec<Coordinate> = found.iter().map(|m| m.value).collect();
        assert_eq!(
            values,
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(40.5, -3.5)]
        );
    }

    #[test]
    fn test_precise_marker_integer_tokens() {
        let found = PreciseMarkerMatcher.candidates("!3d40!4d-3");
        assert_eq!(found[0].value, Coordinate::new(40.0, -3.0));
    }

    #[test]
    fn test_secondary_marker_swaps_roles() {
        let found = SecondaryMarkerMatcher.candidates("[null,[3,-71.54449177677758,-32.973640155577314]]");
        assert_eq!(
            found[0].value,
            Coordinate::new(-32.973640155577314, -71.54449177677758)
        );
    }

    #[test]
    fn test_null_prefixed() {
        let found = NullPrefixedMatcher.candidates("[null,null,48.8583701,2.2944813]");
        assert_eq!(found[0].value, Coordinate::new(48.8583701, 2.2944813));
    }

    #[test]
    fn test_no_match() {
        assert!(PreciseMarkerMatcher.candidates("!3d!4d").is_empty());
        assert!(SecondaryMarkerMatcher.candidates("[4,1.5,2.5]").is_empty());
        assert!(NullPrefixedMatcher.candidates("null,1.5,2.5").is_empty());
    }
}
