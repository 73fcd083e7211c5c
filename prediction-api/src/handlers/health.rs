use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use common::HealthResponse;

/// Health check endpoint
///
/// Always 200; readiness is carried by the `status` field.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: state.slot.status(),
    })
}
