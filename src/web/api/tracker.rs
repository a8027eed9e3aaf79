use axum::{extract::State, Json};

use crate::tracker::{TrackerError, TrackerMode};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/tracker/start",
    responses(
        (status = 200, description = "Tracker started", body = TrackerMode),
        (status = 409, description = "Tracker already running", body = ErrorResponse)
    ),
    tag = "tracker"
)]
pub async fn start(State(state): State<AppState>) -> ApiResult<Json<TrackerMode>> {
    let mut tracker = state.tracker.lock().await;
    tracker
        .start(
            state.client.clone(),
            state.config.matching.clone(),
            state.config.feed.poll_interval,
        )
        .map_err(map_tracker_error)?;
    Ok(Json(tracker.status().mode))
}

#[utoipa::path(
    post,
    path = "/api/tracker/stop",
    responses(
        (status = 200, description = "Tracker stopped", body = TrackerMode)
    ),
    tag = "tracker"
)]
pub async fn stop(State(state): State<AppState>) -> Json<TrackerMode> {
    let mut tracker = state.tracker.lock().await;
    tracker.stop().await;
    Json(tracker.status().mode)
}

fn map_tracker_error(err: TrackerError) -> ApiError {
    match err {
        TrackerError::AlreadyRunning => ApiError::Conflict("tracker_running"),
    }
}
