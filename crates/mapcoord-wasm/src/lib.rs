//! WASM bindings for map-link coordinate extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Network access stays on the JavaScript side: expand short links with
//! `fetch` and pass the final URL (or the page markup) in here.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use mapcoord_core::{
    filter_by_distance, haversine_km as core_haversine_km, Coordinate, CoordinateExtractor,
    ExtractionReport, Hsl, PairOrder, Rgb, Venue, VenueSubmission,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than ES2015 Maps
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// True for full map links and short links.
#[wasm_bindgen]
pub fn is_supported_map_url(url: &str) -> bool {
    mapcoord_core::is_supported_map_url(url)
}

/// True when the link must be expanded before extraction.
#[wasm_bindgen]
pub fn is_short_link(url: &str) -> bool {
    mapcoord_core::is_short_link(url)
}

/// Extract coordinates from a URL or page markup.
///
/// Always resolves to a report object; check its `success` field.
#[wasm_bindgen]
pub fn extract_coordinates(text: &str) -> Result<JsValue, JsValue> {
    to_js(&report(&CoordinateExtractor::new(), text))
}

fn report(extractor: &CoordinateExtractor, text: &str) -> ExtractionReport {
    ExtractionReport::from_result(&extractor.extract(text))
}

/// Great-circle distance in kilometres.
#[wasm_bindgen]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    core_haversine_km(Coordinate::new(lat1, lng1), Coordinate::new(lat2, lng2))
}

/// Venues within `max_km` of a point, nearest first, each with `distance_km`.
#[wasm_bindgen]
pub fn filter_venues_by_distance(
    venues: JsValue,
    lat: f64,
    lng: f64,
    max_km: f64,
) -> Result<JsValue, JsValue> {
    let venues: Vec<Venue> = serde_wasm_bindgen::from_value(venues)
        .map_err(|e| JsValue::from_str(&format!("invalid venues: {}", e)))?;

    to_js(&filter_by_distance(venues, Coordinate::new(lat, lng), max_km))
}

/// Problems with a venue submission form; empty when it can be saved.
#[wasm_bindgen]
pub fn validate_submission(submission: JsValue) -> Result<JsValue, JsValue> {
    let submission: VenueSubmission = serde_wasm_bindgen::from_value(submission)
        .map_err(|e| JsValue::from_str(&format!("invalid submission: {}", e)))?;

    to_js(&submission.validate())
}

/// Convert `#rrggbb` (or `#rgb`) to `h s% l%` for CSS custom properties.
#[wasm_bindgen]
pub fn hex_to_hsl(hex: &str) -> Result<String, JsValue> {
    Rgb::from_hex(hex)
        .map(|rgb| Hsl::from_rgb(rgb).to_css_components())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Coordinate extractor class for browser use.
#[wasm_bindgen]
pub struct CoordinateExtractorJs {
    extractor: CoordinateExtractor,
}

#[wasm_bindgen]
impl CoordinateExtractorJs {
    /// Create a new extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: CoordinateExtractor::new(),
        }
    }

    /// Read ambiguous `[a,b]` pairs as latitude first.
    #[wasm_bindgen]
    pub fn set_lat_first(&mut self, lat_first: bool) {
        let order = if lat_first {
            PairOrder::LatLng
        } else {
            PairOrder::LngLat
        };
        self.extractor = self.extractor.with_pair_order(order);
    }

    /// Set whether (0,0) and the default map centre are rejected.
    #[wasm_bindgen]
    pub fn set_reject_suspect(&mut self, reject: bool) {
        self.extractor = self.extractor.with_suspect_rejection(reject);
    }

    /// Extract coordinates, returning the report object.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&report(&self.extractor, text))
    }
}

impl Default for CoordinateExtractorJs {
    fn default() -> Self {
        Self::new()
    }
}
