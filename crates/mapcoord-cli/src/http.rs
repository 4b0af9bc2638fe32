//! HTTP-backed short-link resolver and page fetcher.

use std::time::Duration;

use reqwest::{redirect::Policy, Client, StatusCode};
use tracing::debug;

use mapcoord_core::models::config::NetworkConfig;
use mapcoord_core::{PageFetcher, ResolveError, Resolver};

/// reqwest client configured from [`NetworkConfig`].
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &NetworkConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

fn network_error(err: reqwest::Error) -> ResolveError {
    ResolveError::Network(err.to_string())
}

impl Resolver for HttpClient {
    async fn resolve(&self, url: &str) -> Result<String, ResolveError> {
        let mut response = self.client.head(url).send().await.map_err(network_error)?;

        // Method fallback for shorteners that reject HEAD, not a retry:
        // any other failure is returned as is
        if response.status() == StatusCode::METHOD_NOT_ALLOWED {
            debug!("HEAD not allowed for {}, falling back to GET", url);
            response = self.client.get(url).send().await.map_err(network_error)?;
        }

        if !response.status().is_success() {
            return Err(ResolveError::Status(response.status().as_u16()));
        }

        Ok(response.url().to_string())
    }
}

impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.client.get(url).send().await.map_err(network_error)?;

        if !response.status().is_success() {
            return Err(ResolveError::Status(response.status().as_u16()));
        }

        let body = response.text().await.map_err(network_error)?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Markup read from disk, served in place of a fetch.
pub struct StaticPage(pub String);

impl PageFetcher for StaticPage {
    async fn fetch(&self, _url: &str) -> Result<String, ResolveError> {
        Ok(self.0.clone())
    }
}
