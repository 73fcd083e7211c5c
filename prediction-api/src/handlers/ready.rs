use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use common::{HealthResponse, ModelStatus};

/// Readiness probe: 200 only once the model is loaded
pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = state.slot.status();
    let code = match status {
        ModelStatus::Ok => StatusCode::OK,
        ModelStatus::Loading | ModelStatus::Failed => StatusCode::SERVICE_UNAVAILABLE,
    };

    (code, Json(HealthResponse { status }))
}
