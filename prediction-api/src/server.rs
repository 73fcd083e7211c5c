use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the HTTP server with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        .route("/predict", post(handlers::predict_handler))
        .route("/v1/predict", post(handlers::predict_binary_handler))
        .route("/v2/predict", post(handlers::predict_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
