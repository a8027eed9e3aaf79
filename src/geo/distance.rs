use super::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points using the haversine formula.
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push h slightly outside [0, 1] near antipodes
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
