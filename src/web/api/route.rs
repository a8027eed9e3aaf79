use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::geo::{project, Bounds, GeoPoint, Viewport};
use crate::route::Route;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectionQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProjectedPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub bearing_deg: f64,
    pub is_live: bool,
}

/// Screen-space geometry for drawing the route and the aircraft marker.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapProjection {
    pub viewport: Viewport,
    pub bounds: Bounds,
    pub path: Vec<ProjectedPoint>,
    pub marker: Option<Marker>,
}

pub fn project_route(
    route: &Route,
    viewport: Viewport,
    position: Option<GeoPoint>,
    bearing_deg: f64,
    is_live: bool,
) -> MapProjection {
    let bounds = route.map_bounds();
    let path = route
        .waypoints
        .iter()
        .map(|w| {
            let (x, y) = project(w.point, &viewport, &bounds);
            ProjectedPoint {
                name: w.name.to_string(),
                x,
                y,
            }
        })
        .collect();
    let marker = position.map(|p| {
        let (x, y) = project(p, &viewport, &bounds);
        Marker {
            x,
            y,
            bearing_deg,
            is_live,
        }
    });

    MapProjection {
        viewport,
        bounds,
        path,
        marker,
    }
}

#[utoipa::path(
    get,
    path = "/api/route",
    responses(
        (status = 200, description = "Static reference route", body = Route)
    ),
    tag = "route"
)]
pub async fn route(State(state): State<AppState>) -> Json<Route> {
    let tracker = state.tracker.lock().await;
    Json(tracker.route().clone())
}

#[utoipa::path(
    get,
    path = "/api/route/projection",
    params(ProjectionQuery),
    responses(
        (status = 200, description = "Route and marker in viewport pixels", body = MapProjection),
        (status = 400, description = "Viewport not finite or too small for its padding", body = ErrorResponse)
    ),
    tag = "route"
)]
pub async fn projection(
    State(state): State<AppState>,
    Query(query): Query<ProjectionQuery>,
) -> ApiResult<Json<MapProjection>> {
    let defaults = state.config.map;
    let viewport = Viewport {
        width: query.width.unwrap_or(defaults.width),
        height: query.height.unwrap_or(defaults.height),
        padding: query.padding.unwrap_or(defaults.padding),
    };
    if !viewport.is_drawable() {
        return Err(ApiError::Validation(
            "viewport must be finite and larger than twice its padding".into(),
        ));
    }

    let tracker = state.tracker.lock().await;
    let status = tracker.status();
    Ok(Json(project_route(
        tracker.route(),
        viewport,
        status.flight.position,
        status.marker_bearing_deg,
        status.flight.is_live,
    )))
}
