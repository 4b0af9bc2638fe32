//! Geographic primitives: coordinates, bounding boxes and great-circle distance.

pub mod distance;

use serde::{Deserialize, Serialize};

pub use distance::{
    filter_by_distance, haversine_km, EARTH_RADIUS_KM, Located, Nearby, NearbyVenue,
};

/// Slack added to bounding boxes to absorb rounding.
const BOX_MARGIN_DEG: f64 = 1e-9;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, -90 to 90.
    #[serde(alias = "latitude")]
    pub lat: f64,
    /// Longitude, -180 to 180.
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

impl Coordinate {
    /// Centre the map service falls back to when it has no real location.
    pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
        lat: 51.5074,
        lng: -0.1278,
    };

    /// Null island.
    pub const ORIGIN: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check both components are within their geographic bounds.
    pub fn is_in_bounds(&self) -> bool {
        self.lat.abs() <= 90.0 && self.lng.abs() <= 180.0
    }

    /// A coordinate that carries no information about a real place.
    ///
    /// Exactly (0, 0) and the service's default map centre are both
    /// emitted by pages that failed to locate anything.
    pub fn is_suspect(&self) -> bool {
        *self == Self::ORIGIN || *self == Self::DEFAULT_MAP_CENTER
    }

    /// In bounds and not a placeholder.
    pub fn is_informative(&self) -> bool {
        self.is_in_bounds() && !self.is_suspect()
    }

    /// Axis-aligned box enclosing every point within `radius_km`.
    ///
    /// Uses the spherical bounds of the radius circle, so every point the
    /// haversine distance accepts lies inside the box.
    pub fn bounding_box(&self, radius_km: f64) -> BoundingBox {
        let angular = radius_km / EARTH_RADIUS_KM;
        let lat_delta = angular.to_degrees() + BOX_MARGIN_DEG;

        let min_lat = self.lat - lat_delta;
        let max_lat = self.lat + lat_delta;

        // A circle reaching a pole covers every longitude
        if min_lat <= -90.0 || max_lat >= 90.0 || angular >= std::f64::consts::PI {
            return BoundingBox {
                min_lat: min_lat.max(-90.0),
                max_lat: max_lat.min(90.0),
                min_lng: -180.0,
                max_lng: 180.0,
            };
        }

        let ratio = angular.sin() / self.lat.to_radians().cos();
        let (min_lng, max_lng) = if ratio >= 1.0 {
            (-180.0, 180.0)
        } else {
            let lng_delta = ratio.asin().to_degrees() + BOX_MARGIN_DEG;
            let (lo, hi) = (self.lng - lng_delta, self.lng + lng_delta);
            // Boxes crossing the antimeridian span every longitude
            if lo < -180.0 || hi > 180.0 {
                (-180.0, 180.0)
            } else {
                (lo, hi)
            }
        };

        BoundingBox {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Rectangular lat/lng region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: &Coordinate) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_in_bounds());
        assert!(Coordinate::new(-90.0, -180.0).is_in_bounds());
        assert!(!Coordinate::new(90.1, 0.0).is_in_bounds());
        assert!(!Coordinate::new(0.0, -180.5).is_in_bounds());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_in_bounds());
    }

    #[test]
    fn test_suspect_coordinates() {
        assert!(Coordinate::new(0.0, 0.0).is_suspect());
        assert!(Coordinate::new(51.5074, -0.1278).is_suspect());
        assert!(!Coordinate::new(51.5074, -0.1279).is_suspect());
        assert!(!Coordinate::new(51.5074, -0.1278).is_informative());
        assert!(Coordinate::new(40.4280246, -3.6887462).is_informative());
    }

    #[test]
    fn test_bounding_box_contains_center() {
        let madrid = Coordinate::new(40.4168, -3.7038);
        let bbox = madrid.bounding_box(10.0);
        assert!(bbox.contains(&madrid));
        assert!(bbox.min_lat < madrid.lat && bbox.max_lat > madrid.lat);
        assert!(!bbox.contains(&Coordinate::new(41.0, -3.7038)));
    }

    #[test]
    fn test_bounding_box_near_pole_and_antimeridian() {
        let pole = Coordinate::new(90.0, 10.0).bounding_box(5.0);
        assert_eq!(pole.min_lng, -180.0);
        assert_eq!(pole.max_lat, 90.0);

        let fiji = Coordinate::new(-17.7, 179.9).bounding_box(50.0);
        assert_eq!((fiji.min_lng, fiji.max_lng), (-180.0, 180.0));
    }

    #[test]
    fn test_bounding_box_covers_radius_edge() {
        let center = Coordinate::new(60.0, 10.0);
        // Exactly 100 km due north and due east along the great circle
        let north = Coordinate::new(60.0 + (100.0 / EARTH_RADIUS_KM).to_degrees(), 10.0);
        let bbox = center.bounding_box(100.0);

        assert!(bbox.contains(&north));
        assert!(bbox.max_lng - center.lng > 100.0 / (111.2 * 60f64.to_radians().cos()) - 0.01);
    }
}
