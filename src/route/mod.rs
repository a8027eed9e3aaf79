mod region;
mod types;

pub use region::region_for_longitude;
pub use types::{Route, Waypoint};
