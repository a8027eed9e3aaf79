use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GeoPoint;

/// Degrees added on every side of the waypoint bounding box.
pub const MAP_MARGIN_DEG: f64 = 5.0;

/// Marker orientation used before a previous position is known (due east).
pub const DEFAULT_BEARING_DEG: f64 = 90.0;

/// Drawing surface the map is projected onto, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

/// Longitude/latitude extent mapped onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Viewport {
    /// Finite dimensions with room left over after padding on both axes.
    pub fn is_drawable(&self) -> bool {
        [self.width, self.height, self.padding]
            .iter()
            .all(|v| v.is_finite())
            && self.padding >= 0.0
            && self.width > 2.0 * self.padding
            && self.height > 2.0 * self.padding
    }
}

impl Bounds {
    /// Degenerate box covering a single point.
    pub fn at(point: GeoPoint) -> Self {
        Self {
            min_lat: point.latitude,
            max_lat: point.latitude,
            min_lon: point.longitude,
            max_lon: point.longitude,
        }
    }

    pub fn include(&mut self, point: GeoPoint) {
        self.min_lat = self.min_lat.min(point.latitude);
        self.max_lat = self.max_lat.max(point.latitude);
        self.min_lon = self.min_lon.min(point.longitude);
        self.max_lon = self.max_lon.max(point.longitude);
    }

    pub fn expanded(self, margin_deg: f64) -> Self {
        Self {
            min_lat: self.min_lat - margin_deg,
            max_lat: self.max_lat + margin_deg,
            min_lon: self.min_lon - margin_deg,
            max_lon: self.max_lon + margin_deg,
        }
    }
}

/// Equirectangular projection of `point` into viewport pixels.
///
/// Longitude maps linearly onto `[padding, width - padding]` and latitude onto
/// `[height - padding, padding]`, so north is up. The bounds must have a
/// non-zero extent on both axes.
pub fn project(point: GeoPoint, viewport: &Viewport, bounds: &Bounds) -> (f64, f64) {
    let drawable_w = viewport.width - 2.0 * viewport.padding;
    let drawable_h = viewport.height - 2.0 * viewport.padding;

    let x = viewport.padding
        + (point.longitude - bounds.min_lon) / (bounds.max_lon - bounds.min_lon) * drawable_w;
    let y = viewport.height
        - viewport.padding
        - (point.latitude - bounds.min_lat) / (bounds.max_lat - bounds.min_lat) * drawable_h;
    (x, y)
}

/// Heading of the segment `from -> to` on the flat map, in degrees within
/// (-180, 180], where 0 points north and 90 points east.
pub fn bearing_degrees(from: Option<GeoPoint>, to: GeoPoint) -> f64 {
    let Some(from) = from else {
        return DEFAULT_BEARING_DEG;
    };

    let dx = to.longitude - from.longitude;
    let dy = to.latitude - from.latitude;
    let bearing = dx.atan2(dy).to_degrees();
    if bearing <= -180.0 {
        bearing + 360.0
    } else {
        bearing
    }
}
