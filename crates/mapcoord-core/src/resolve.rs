//! Classify, expand and extract: the full path from a pasted link to a
//! coordinate.
//!
//! Network access is injected through [`Resolver`] and [`PageFetcher`].
//! Nothing here retries or enforces a timeout; callers own both.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, LocateError, ResolveError};
use crate::extract::{CoordinateExtractor, Extraction};
use crate::url::{classify, UrlKind};

/// Expands a short link to the URL it redirects to.
#[allow(async_fn_in_trait)]
pub trait Resolver {
    async fn resolve(&self, url: &str) -> Result<String, ResolveError>;
}

/// Downloads the markup behind a map URL.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ResolveError>;
}

/// Resolver for callers that only ever pass full URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolver for NoResolver {
    async fn resolve(&self, _url: &str) -> Result<String, ResolveError> {
        Err(ResolveError::Network("short link expansion is not available".to_string()))
    }
}

/// A located map link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocateOutcome {
    /// The URL as supplied (trimmed).
    pub input: String,
    /// The URL the coordinate was read from, after expansion.
    pub final_url: String,
    /// How the input was classified.
    pub kind: UrlKind,
    /// The accepted coordinate.
    pub extraction: Extraction,
    /// Whether the coordinate came from fetched markup rather than the URL.
    pub from_page: bool,
}

/// Runs classification, short-link expansion and extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator {
    extractor: CoordinateExtractor,
}

impl Locator {
    pub fn new(extractor: CoordinateExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &CoordinateExtractor {
        &self.extractor
    }

    /// Classify `url`, expand it if it is a short link, and return the
    /// final URL.
    pub async fn expand<R: Resolver>(
        &self,
        url: &str,
        resolver: &R,
    ) -> Result<(UrlKind, String), LocateError> {
        let url = url.trim();

        match classify(url) {
            UrlKind::Unsupported => {
                debug!("Rejecting unsupported URL: {}", url);
                Err(LocateError::UnsupportedUrl(url.to_string()))
            }
            UrlKind::Full => Ok((UrlKind::Full, url.to_string())),
            UrlKind::Short => {
                info!("Expanding short link {}", url);
                let expanded = resolver.resolve(url).await.map_err(|e| {
                    LocateError::RedirectResolutionFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                debug!("Short link {} expanded to {}", url, expanded);
                Ok((UrlKind::Short, expanded))
            }
        }
    }

    /// Locate a map URL using only the URL text.
    pub async fn locate<R: Resolver>(
        &self,
        url: &str,
        resolver: &R,
    ) -> Result<LocateOutcome, LocateError> {
        let (kind, final_url) = self.expand(url, resolver).await?;
        let extraction = self.extractor.extract(&final_url)?;

        Ok(LocateOutcome {
            input: url.trim().to_string(),
            final_url,
            kind,
            extraction,
            from_page: false,
        })
    }

    /// Locate a map URL, falling back to the page markup when the URL
    /// itself carries no usable coordinate.
    pub async fn locate_with_page<R: Resolver, F: PageFetcher>(
        &self,
        url: &str,
        resolver: &R,
        fetcher: &F,
    ) -> Result<LocateOutcome, LocateError> {
        let (kind, final_url) = self.expand(url, resolver).await?;

        let url_error = match self.extractor.extract(&final_url) {
            Ok(extraction) => {
                return Ok(LocateOutcome {
                    input: url.trim().to_string(),
                    final_url,
                    kind,
                    extraction,
                    from_page: false,
                });
            }
            Err(err) => err,
        };

        debug!("No coordinate in URL ({}), fetching page", url_error);

        let markup = match fetcher.fetch(&final_url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!("Failed to fetch {}: {}", final_url, e);
                return Err(url_error.into());
            }
        };

        match self.extractor.extract(&markup) {
            Ok(extraction) => Ok(LocateOutcome {
                input: url.trim().to_string(),
                final_url,
                kind,
                extraction,
                from_page: true,
            }),
            Err(page_error) => Err(worst_of(url_error, page_error).into()),
        }
    }
}

/// Report invalid candidates over a plain miss.
fn worst_of(a: ExtractionError, b: ExtractionError) -> ExtractionError {
    if a == ExtractionError::AllCandidatesInvalid || b == ExtractionError::AllCandidatesInvalid {
        ExtractionError::AllCandidatesInvalid
    } else {
        ExtractionError::NoCoordinatesFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionMethod;
    use crate::geo::Coordinate;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Serves canned redirects and pages, counting calls.
    #[derive(Default)]
    struct StubNetwork {
        redirects: HashMap<String, String>,
        pages: HashMap<String, String>,
        calls: Cell<usize>,
    }

    impl StubNetwork {
        fn redirect(mut self, from: &str, to: &str) -> Self {
            self.redirects.insert(from.to_string(), to.to_string());
            self
        }

        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl Resolver for StubNetwork {
        async fn resolve(&self, url: &str) -> Result<String, ResolveError> {
            self.calls.set(self.calls.get() + 1);
            self.redirects.get(url).cloned().ok_or(ResolveError::Status(404))
        }
    }

    impl PageFetcher for StubNetwork {
        async fn fetch(&self, url: &str) -> Result<String, ResolveError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ResolveError::Network("connection refused".to_string()))
        }
    }

    const SHORT: &str = "https://maps.app.goo.gl/Ab12Cd";
    const EXPANDED: &str =
        "https://www.google.com/maps/place/Cafe/@40.4276243,-3.6897011,17z/data=!3d40.4280246!4d-3.6887462";

    #[tokio::test]
    async fn test_unsupported_url() {
        let result = Locator::default().locate("https://example.com/", &NoResolver).await;
        assert_eq!(
            result,
            Err(LocateError::UnsupportedUrl("https://example.com/".to_string()))
        );
    }

    #[tokio::test]
    async fn test_full_url_skips_resolver() {
        let network = StubNetwork::default();
        let outcome = Locator::default().locate(EXPANDED, &network).await.unwrap();

        assert_eq!(network.calls.get(), 0);
        assert_eq!(outcome.kind, UrlKind::Full);
        assert_eq!(outcome.extraction.coordinate, Coordinate::new(40.4280246, -3.6887462));
    }

    #[tokio::test]
    async fn test_short_link_is_expanded() {
        let network = StubNetwork::default().redirect(SHORT, EXPANDED);
        let outcome = Locator::default().locate(SHORT, &network).await.unwrap();

        assert_eq!(outcome.kind, UrlKind::Short);
        assert_eq!(outcome.final_url, EXPANDED);
        assert_eq!(outcome.extraction.method, ExtractionMethod::PrecisePattern);
    }

    #[tokio::test]
    async fn test_resolution_failure_is_not_retried() {
        let network = StubNetwork::default();
        let result = Locator::default().locate(SHORT, &network).await;

        assert_eq!(network.calls.get(), 1);
        assert_eq!(
            result,
            Err(LocateError::RedirectResolutionFailed {
                url: SHORT.to_string(),
                reason: "HTTP 404".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_page_fallback() {
        let url = "https://www.google.com/maps?cid=1234";
        let network = StubNetwork::default().page(url, "<script>[null,null,48.8583701,2.2944813]</script>");

        let outcome = Locator::default()
            .locate_with_page(url, &network, &network)
            .await
            .unwrap();

        assert!(outcome.from_page);
        assert_eq!(outcome.extraction.coordinate, Coordinate::new(48.8583701, 2.2944813));
    }

    #[tokio::test]
    async fn test_page_fetch_failure_reports_url_error() {
        let url = "https://www.google.com/maps?cid=1234";
        let network = StubNetwork::default();

        let result = Locator::default().locate_with_page(url, &network, &network).await;
        assert_eq!(result, Err(LocateError::NoCoordinatesFound));
    }

    #[tokio::test]
    async fn test_page_with_only_placeholders() {
        let url = "https://www.google.com/maps?cid=1234";
        let network = StubNetwork::default().page(url, "[-0.1278,51.5074]");

        let result = Locator::default().locate_with_page(url, &network, &network).await;
        assert_eq!(result, Err(LocateError::AllCandidatesInvalid));
    }
}
