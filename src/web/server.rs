use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::route::Route;
use crate::tracker::Tracker;

use super::api::flight as flight_handlers;
use super::api::route as route_handlers;
use super::api::tracker as tracker_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let client = Arc::new(config.feed_client().map_err(std::io::Error::other)?);

    let mut tracker = Tracker::new(Route::default());
    if let Err(e) = tracker.start(
        client.clone(),
        config.matching.clone(),
        config.feed.poll_interval,
    ) {
        log::warn!("Failed to start tracker: {}", e);
    }

    let state = AppState {
        config: Arc::new(config),
        client,
        tracker: Arc::new(Mutex::new(tracker)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Flight API endpoints
        .route("/api/flight", get(flight_handlers::status))
        .route("/api/flight/eta", get(flight_handlers::eta))
        // Route API endpoints
        .route("/api/route", get(route_handlers::route))
        .route("/api/route/projection", get(route_handlers::projection))
        // Tracker API endpoints
        .route("/api/tracker/start", post(tracker_handlers::start))
        .route("/api/tracker/stop", post(tracker_handlers::stop))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
