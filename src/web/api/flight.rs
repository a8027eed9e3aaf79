use axum::{extract::State, Json};

use crate::flight::Eta;
use crate::tracker::TrackerStatus;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/flight",
    responses(
        (status = 200, description = "Current flight status", body = TrackerStatus)
    ),
    tag = "flight"
)]
pub async fn status(State(state): State<AppState>) -> Json<TrackerStatus> {
    let tracker = state.tracker.lock().await;
    Json(tracker.status())
}

#[utoipa::path(
    get,
    path = "/api/flight/eta",
    responses(
        (status = 200, description = "Estimated time to arrival, zero when unknown", body = Eta)
    ),
    tag = "flight"
)]
pub async fn eta(State(state): State<AppState>) -> Json<Eta> {
    let tracker = state.tracker.lock().await;
    Json(tracker.status().eta)
}
