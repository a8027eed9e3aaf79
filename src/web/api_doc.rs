use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::route::{MapProjection, Marker, ProjectedPoint};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::flight::status,
        super::api::flight::eta,
        super::api::route::route,
        super::api::route::projection,
        super::api::tracker::start,
        super::api::tracker::stop,
    ),
    components(
        schemas(
            ErrorResponse,
            MapProjection,
            Marker,
            ProjectedPoint,
            crate::tracker::TrackerStatus,
            crate::tracker::TrackerMode,
            crate::tracker::PollOutcome,
            crate::flight::FlightState,
            crate::flight::Eta,
            crate::geo::GeoPoint,
            crate::geo::Viewport,
            crate::geo::Bounds,
            crate::route::Route,
            crate::route::Waypoint,
        )
    ),
    info(
        title = "Flight-O-Mat API",
        description = "Live status of a single tracked flight along its reference route",
        version = "0.1.0"
    ),
    tags(
        (name = "flight", description = "Derived flight state"),
        (name = "route", description = "Reference route and map projection"),
        (name = "tracker", description = "Feed poller control")
    )
)]
pub struct ApiDoc;
