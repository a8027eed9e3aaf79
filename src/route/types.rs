use serde::Serialize;
use utoipa::ToSchema;

use crate::geo::{haversine_distance_km, Bounds, GeoPoint, MAP_MARGIN_DEG};

/// A named reference point on the drawn route.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Waypoint {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub region: &'static str,
    pub point: GeoPoint,
}

impl Waypoint {
    pub const fn new(name: &'static str, region: &'static str, lat: f64, lon: f64) -> Self {
        Self {
            name,
            region,
            point: GeoPoint::new(lat, lon),
        }
    }
}

const LONDON_DHAKA: [Waypoint; 8] = [
    Waypoint::new("London Heathrow", "Western Europe", 51.47, -0.4543),
    Waypoint::new("Frankfurt", "Western Europe", 50.0379, 8.5622),
    Waypoint::new("Vienna", "Central Europe", 48.1103, 16.5697),
    Waypoint::new("Istanbul", "Eastern Europe", 41.2753, 28.7519),
    Waypoint::new("Tehran", "Middle East", 35.6892, 51.389),
    Waypoint::new("Kabul", "Central Asia", 34.5553, 69.2075),
    Waypoint::new("Delhi", "Northern India", 28.5562, 77.1),
    Waypoint::new("Dhaka", "Bangladesh", 23.8103, 90.4125),
];

/// The static reference route: endpoints for progress and ETA, waypoints for
/// drawing only.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Route {
    pub departure: GeoPoint,
    pub arrival: GeoPoint,
    pub waypoints: Vec<Waypoint>,
}

impl Default for Route {
    fn default() -> Self {
        Self::london_dhaka()
    }
}

impl Route {
    pub fn london_dhaka() -> Self {
        Self {
            departure: LONDON_DHAKA[0].point,
            arrival: LONDON_DHAKA[LONDON_DHAKA.len() - 1].point,
            waypoints: LONDON_DHAKA.to_vec(),
        }
    }

    pub fn total_distance_km(&self) -> f64 {
        haversine_distance_km(self.departure, self.arrival)
    }

    /// Map extent: the waypoint bounding box plus the fixed margin.
    pub fn map_bounds(&self) -> Bounds {
        let mut bounds = Bounds::at(self.departure);
        bounds.include(self.arrival);
        self.waypoints.iter().for_each(|w| bounds.include(w.point));
        bounds.expanded(MAP_MARGIN_DEG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::region_for_longitude;

    #[test]
    fn test_default_route_endpoints() {
        let route = Route::default();
        assert_eq!(route.departure, GeoPoint::new(51.47, -0.4543));
        assert_eq!(route.arrival, GeoPoint::new(23.8103, 90.4125));
        assert_eq!(route.waypoints.len(), 8);
    }

    #[test]
    fn test_waypoint_regions_match_longitude_bands() {
        for w in Route::default().waypoints {
            assert_eq!(w.region, region_for_longitude(w.point.longitude), "{}", w.name);
        }
    }

    #[test]
    fn test_map_bounds() {
        let b = Route::default().map_bounds();
        assert_eq!(b.min_lon, -0.4543 - MAP_MARGIN_DEG);
        assert_eq!(b.max_lon, 90.4125 + MAP_MARGIN_DEG);
        assert_eq!(b.max_lat, 51.47 + MAP_MARGIN_DEG);
        assert_eq!(b.min_lat, 23.8103 - MAP_MARGIN_DEG);
    }
}
