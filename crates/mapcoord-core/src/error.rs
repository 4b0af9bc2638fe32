//! Error types for the mapcoord-core library.

use thiserror::Error;

/// Main error type for the mapcoord library.
#[derive(Error, Debug)]
pub enum MapcoordError {
    /// Locating a map link failed.
    #[error("locate error: {0}")]
    Locate(#[from] LocateError),

    /// Coordinate extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Theme colour parsing error.
    #[error("color error: {0}")]
    Color(#[from] ColorError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from scanning text for coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The text was scanned but no pattern matched.
    #[error("no coordinates found")]
    NoCoordinatesFound,

    /// Patterns matched, but every candidate was out of bounds or a placeholder.
    #[error("no valid coordinates")]
    AllCandidatesInvalid,
}

/// Errors from the full classify / resolve / extract pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// Input is not a recognised map-service URL.
    #[error("unsupported map URL: {0}")]
    UnsupportedUrl(String),

    /// The injected resolver could not expand a short link.
    #[error("could not expand short URL {url}: {reason}")]
    RedirectResolutionFailed { url: String, reason: String },

    /// The text was scanned but no pattern matched.
    #[error("no coordinates found")]
    NoCoordinatesFound,

    /// Patterns matched, but every candidate was invalid.
    #[error("no valid coordinates")]
    AllCandidatesInvalid,
}

impl From<ExtractionError> for LocateError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NoCoordinatesFound => LocateError::NoCoordinatesFound,
            ExtractionError::AllCandidatesInvalid => LocateError::AllCandidatesInvalid,
        }
    }
}

/// Failure reported by a redirect resolver or page fetcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),
}

/// Errors related to theme colour values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Not a `#rgb` or `#rrggbb` hex string.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Result type for the mapcoord library.
pub type Result<T> = std::result::Result<T, MapcoordError>;
