//! Configuration structures for extraction, networking and display.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::theme::ThemeConfig;
use crate::error::MapcoordError;
use crate::extract::PairOrder;

/// Main configuration for mapcoord.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapcoordConfig {
    /// Coordinate extraction configuration.
    pub extraction: ExtractionConfig,

    /// Short-link expansion and page fetching.
    pub network: NetworkConfig,

    /// Distance filtering defaults.
    pub distance: DistanceConfig,

    /// Display theme.
    pub theme: ThemeConfig,
}

/// Coordinate extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How to read `[a,b]` pairs whose magnitudes don't settle the roles.
    pub pair_order: PairOrder,

    /// Reject (0,0) and the default map centre.
    pub reject_suspect: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pair_order: PairOrder::LngLat,
            reject_suspect: true,
        }
    }
}

/// HTTP settings used when expanding short links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum redirects to follow.
    pub max_redirects: usize,

    /// User-Agent header sent with requests.
    pub user_agent: String,

    /// Fetch the page markup when the URL has no coordinate.
    pub fetch_page: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: concat!("mapcoord/", env!("CARGO_PKG_VERSION")).to_string(),
            fetch_page: false,
        }
    }
}

/// Distance filter defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// Radius used when none is given, in kilometres.
    pub default_max_km: f64,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            default_max_km: 10.0,
        }
    }
}

impl MapcoordConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no command could use.
    pub fn validate(&self) -> crate::Result<()> {
        let max_km = self.distance.default_max_km;
        if !max_km.is_finite() || max_km < 0.0 {
            return Err(MapcoordError::Config(format!(
                "distance.default_max_km must be a non-negative number, got {}",
                max_km
            )));
        }
        if self.network.timeout_secs == 0 {
            return Err(MapcoordError::Config(
                "network.timeout_secs must be at least 1".to_string(),
            ));
        }
        self.theme.primary_hsl()?;
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = MapcoordConfig::default();
        config.extraction.pair_order = PairOrder::LatLng;
        config.network.timeout_secs = 3;
        config.save(&path).unwrap();

        assert_eq!(MapcoordConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: MapcoordConfig =
            serde_json::from_str(r#"{"extraction": {"pair_order": "lat-lng"}}"#).unwrap();

        assert_eq!(config.extraction.pair_order, PairOrder::LatLng);
        assert!(config.extraction.reject_suspect);
        assert_eq!(config.network, NetworkConfig::default());
        assert_eq!(config.distance.default_max_km, 10.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MapcoordConfig::default();
        assert!(config.validate().is_ok());

        config.distance.default_max_km = -1.0;
        assert!(matches!(config.validate(), Err(MapcoordError::Config(_))));

        let mut config = MapcoordConfig::default();
        config.theme.primary_color = "blue".to_string();
        assert!(matches!(config.validate(), Err(MapcoordError::Color(_))));
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"network": {"timeout_secs": 0}}"#).unwrap();

        let err = MapcoordConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, MapcoordError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MapcoordConfig::from_file(Path::new("/nonexistent/mapcoord.json")).unwrap_err();
        assert!(matches!(err, crate::MapcoordError::Io(_)));
    }
}
