//! Great-circle distance and radius filtering.

use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::models::venue::Venue;

/// Mean Earth radius (IUGG) in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Anything with a position on the map.
pub trait Located {
    fn location(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn location(&self) -> Coordinate {
        *self
    }
}

/// An item paired with its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nearby<T> {
    #[serde(flatten)]
    pub item: T,
    pub distance_km: f64,
}

/// A venue within range of the user.
pub type NearbyVenue = Nearby<Venue>;

/// Haversine distance between two points in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h marginally past 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Keep items within `max_km` of `origin`, nearest first.
pub fn filter_by_distance<T, I>(items: I, origin: Coordinate, max_km: f64) -> Vec<Nearby<T>>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let bbox = origin.bounding_box(max_km);

    let mut nearby: Vec<Nearby<T>> = items
        .into_iter()
        .filter(|item| bbox.contains(&item.location()))
        .filter_map(|item| {
            let distance_km = haversine_km(origin, item.location());
            (distance_km <= max_km).then_some(Nearby { item, distance_km })
        })
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    nearby
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_haversine_identity_and_symmetry() {
        let madrid = Coordinate::new(40.4168, -3.7038);
        let paris = Coordinate::new(48.8566, 2.3522);

        assert_eq!(haversine_km(madrid, madrid), 0.0);
        assert_eq!(haversine_km(madrid, paris), haversine_km(paris, madrid));
        assert!(approx(haversine_km(madrid, paris), 1053.0, 5.0));
    }

    #[test]
    fn test_haversine_antipodal() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!(approx(d, std::f64::consts::PI * EARTH_RADIUS_KM, 1e-6));
    }

    #[test]
    fn test_filter_keeps_only_venues_in_range() {
        let user = Coordinate::new(40.0, -3.0);
        // ~5 km and ~15 km due north
        let near = Coordinate::new(40.045, -3.0);
        let far = Coordinate::new(40.135, -3.0);

        let result = filter_by_distance(vec![far, near], user, 10.0);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].item, near);
        assert!(approx(result[0].distance_km, 5.0, 0.1));
    }

    #[test]
    fn test_filter_sorts_nearest_first() {
        let user = Coordinate::new(40.0, -3.0);
        let points = vec![
            Coordinate::new(40.08, -3.0),
            Coordinate::new(40.01, -3.0),
            Coordinate::new(40.04, -3.0),
        ];

        let result = filter_by_distance(points, user, 20.0);
        let lats: Vec<f64> = result.iter().map(|n| n.item.lat).collect();
        assert_eq!(lats, vec![40.01, 40.04, 40.08]);
    }
}
