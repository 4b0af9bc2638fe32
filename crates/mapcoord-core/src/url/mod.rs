//! Map-service URL classification.
//!
//! Pure string checks against a fixed set of URL shapes. Nothing here
//! performs I/O; expanding short links is the job of a [`crate::resolve::Resolver`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // google.com/maps, www.google.co.uk/maps/place/...
    static ref FULL_MAPS_PATH: Regex = Regex::new(
        r"(?i)^(?:https?://)?(?:www\.)?google\.[a-z]{2,3}(?:\.[a-z]{2})?/maps(?:[/?#]|$)"
    ).unwrap();

    // maps.google.com/?q=..., maps.google.es/maps/...
    static ref MAPS_SUBDOMAIN: Regex = Regex::new(
        r"(?i)^(?:https?://)?maps\.google\.[a-z]{2,3}(?:\.[a-z]{2})?(?:[/?#]|$)"
    ).unwrap();

    // maps.app.goo.gl/AbC123
    static ref APP_SHORT_LINK: Regex = Regex::new(
        r"(?i)^(?:https?://)?maps\.app\.goo\.gl/[A-Za-z0-9_-]+"
    ).unwrap();

    // goo.gl/maps/AbC123
    static ref LEGACY_SHORT_LINK: Regex = Regex::new(
        r"(?i)^(?:https?://)?goo\.gl/maps/[A-Za-z0-9_-]+"
    ).unwrap();

    // g.co/kgs/AbC123 (shared place cards)
    static ref PLACE_CARD_SHORT_LINK: Regex = Regex::new(
        r"(?i)^(?:https?://)?g\.co/kgs/[A-Za-z0-9_-]+"
    ).unwrap();
}

/// What kind of map link a string is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlKind {
    /// A full map URL that can be scanned directly.
    Full,
    /// A short link that must be expanded first.
    Short,
    /// Not a map-service URL.
    Unsupported,
}

/// Classify a string as a full map URL, a short link, or neither.
pub fn classify(url: &str) -> UrlKind {
    let url = url.trim();

    if is_short_shape(url) {
        UrlKind::Short
    } else if FULL_MAPS_PATH.is_match(url) || MAPS_SUBDOMAIN.is_match(url) {
        UrlKind::Full
    } else {
        UrlKind::Unsupported
    }
}

/// Check whether a string is a recognised map-service URL.
pub fn is_supported_map_url(url: &str) -> bool {
    classify(url) != UrlKind::Unsupported
}

/// Check whether a URL is on a short-link domain and needs expanding.
pub fn is_short_link(url: &str) -> bool {
    is_short_shape(url.trim())
}

fn is_short_shape(url: &str) -> bool {
    APP_SHORT_LINK.is_match(url)
        || LEGACY_SHORT_LINK.is_match(url)
        || PLACE_CARD_SHORT_LINK.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_urls_supported() {
        assert!(is_supported_map_url(
            "https://www.google.com/maps/place/Lafuente+Lorenzo+S.A./@40.4276243,-3.6897011,17z"
        ));
        assert!(is_supported_map_url("https://google.co.uk/maps?q=cafe"));
        assert!(is_supported_map_url("http://maps.google.es/?ll=40.4,-3.7"));
        assert!(is_supported_map_url("  https://www.google.com/maps  "));
        assert!(is_supported_map_url("HTTPS://WWW.GOOGLE.COM/MAPS/@1,2,3z"));
    }

    #[test]
    fn test_short_links() {
        assert!(is_short_link("https://maps.app.goo.gl/AbCdEf123"));
        assert!(is_short_link("https://goo.gl/maps/xyz_987"));
        assert!(is_short_link("g.co/kgs/Qw3rTy"));
        assert!(is_supported_map_url("https://maps.app.goo.gl/AbCdEf123"));
        assert!(!is_short_link("https://www.google.com/maps/place/X"));
        assert!(!is_short_link("https://goo.gl/other/abc"));
    }

    #[test]
    fn test_unsupported_and_garbage() {
        assert!(!is_supported_map_url(""));
        assert!(!is_supported_map_url("not a url at all"));
        assert!(!is_supported_map_url("https://www.google.com/search?q=maps"));
        assert!(!is_supported_map_url("https://evil.example/google.com/maps"));
        assert!(!is_supported_map_url("https://www.google.com/mapsfoo"));
        assert!(!is_supported_map_url("https://maps.app.goo.gl/"));
        assert!(!is_supported_map_url("\u{0}\u{ffff}🗺️"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("https://maps.app.goo.gl/abc"), UrlKind::Short);
        assert_eq!(classify("https://www.google.com/maps/@1,2,3z"), UrlKind::Full);
        assert_eq!(classify("https://openstreetmap.org"), UrlKind::Unsupported);
    }
}
