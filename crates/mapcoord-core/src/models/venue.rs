//! Venue records as stored by the directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geo::{Coordinate, Located};
use crate::url::is_supported_map_url;

/// A published venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Database identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Where the venue is.
    pub location: Coordinate,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Brands sold or served at the venue.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<String>,

    /// Photo URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,

    /// When the venue was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Located for Venue {
    fn location(&self) -> Coordinate {
        self.location
    }
}

/// A user-submitted venue awaiting a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueSubmission {
    pub name: String,

    /// Map link pasted by the submitter.
    pub map_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<String>,
}

impl VenueSubmission {
    /// Check the submission and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push("Missing venue name".to_string());
        }

        if self.map_url.trim().is_empty() {
            issues.push("Missing map link".to_string());
        } else if !is_supported_map_url(&self.map_url) {
            issues.push(format!("Unsupported map link: {}", self.map_url.trim()));
        }

        if self.brands.iter().any(|b| b.trim().is_empty()) {
            issues.push("Empty brand name".to_string());
        }

        issues
    }

    /// Turn the submission into a venue at `location`.
    pub fn into_venue(self, id: impl Into<String>, location: Coordinate) -> Venue {
        Venue {
            id: id.into(),
            name: self.name.trim().to_string(),
            location,
            address: self.address,
            brands: self.brands,
            photos: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }
}

/// Load a JSON array of venues.
pub fn load_venues(path: &Path) -> crate::Result<Vec<Venue>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
