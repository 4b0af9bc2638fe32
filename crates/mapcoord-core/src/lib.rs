//! Core library for locating venues from map-service links.
//!
//! This crate provides:
//! - Map URL classification (full links vs. short links)
//! - Priority-ordered coordinate extraction from URLs and page markup
//! - Short-link expansion through an injected resolver
//! - Haversine distance and radius filtering for venue lists
//! - Venue records, display theme and configuration models

pub mod error;
pub mod extract;
pub mod geo;
pub mod models;
pub mod resolve;
pub mod url;

pub use error::{ColorError, ExtractionError, LocateError, MapcoordError, ResolveError, Result};
pub use extract::{
    extract_coordinates, CoordinateExtractor, Extraction, ExtractionMethod, ExtractionReport,
    ExtractionResult, MatcherKind, PairOrder,
};
pub use geo::{filter_by_distance, haversine_km, Coordinate, Located, Nearby, NearbyVenue};
pub use models::config::MapcoordConfig;
pub use models::theme::{FontChoice, Hsl, Rgb, ThemeConfig};
pub use models::venue::{load_venues, Venue, VenueSubmission};
pub use resolve::{LocateOutcome, Locator, NoResolver, PageFetcher, Resolver};
pub use url::{classify, is_short_link, is_supported_map_url, UrlKind};
