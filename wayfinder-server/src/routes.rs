use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/locations",
            get(handlers::list_locations).post(handlers::add_location),
        )
        .route("/connections", post(handlers::connect))
        .route(
            "/landmarks",
            get(handlers::list_landmarks).post(handlers::add_landmark),
        )
        .route(
            "/landmarks/{name}/routes",
            get(handlers::routes_through_landmark),
        )
        .route("/routes", post(handlers::find_routes))
        .route("/traffic/{location}", get(handlers::traffic_level))
        .route("/distances", post(handlers::distances))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.request_timeout())
                .layer(GlobalConcurrencyLimitLayer::new(config.concurrency_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    }
}
