mod distance;
mod projection;
mod types;

pub use distance::haversine_distance_km;
pub use projection::{
    bearing_degrees, project, Bounds, Viewport, DEFAULT_BEARING_DEG, MAP_MARGIN_DEG,
};
pub use types::GeoPoint;
