use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{CommonError, ErrorBody};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

pub const MODEL_UNAVAILABLE_DETAIL: &str =
    "El modelo no se ha cargado correctamente desde Databricks.";

/// Errors raised by the remote artifact store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Artifact store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Artifact not found: {0}")]
    NotFound(String),
}

/// Startup failures; each one leaves the model status at `failed`
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Missing Databricks credentials: {0}")]
    MissingCredentials(String),

    #[error("Failed to build artifact store client: {0}")]
    Client(String),

    #[error("Download failed: {0}")]
    Store(#[from] StoreError),

    #[error("Downloaded artifact is empty: {0}")]
    EmptyArtifact(String),

    #[error("Failed to deserialize model: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

/// Failures while building the input row or running the model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("invalid row: {0}")]
    Row(#[from] CommonError),

    #[error("column '{0}' not found in input")]
    MissingColumn(String),

    #[error("column '{column}' must be {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("model output {0}")]
    Label(String),

    #[error("malformed model: {0}")]
    Malformed(String),
}

impl InferenceError {
    /// Whether the failure is attributable to the submitted record
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InferenceError::Row(_)
                | InferenceError::MissingColumn(_)
                | InferenceError::TypeMismatch { .. }
        )
    }
}

/// Errors surfaced by the HTTP layer, rendered as `{"detail": ...}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", MODEL_UNAVAILABLE_DETAIL)]
    ModelUnavailable,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Error al procesar la predicción: {0}")]
    Inference(#[from] InferenceError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = Json(ErrorBody {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
