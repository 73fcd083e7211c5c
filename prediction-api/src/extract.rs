use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejections render as 400 `{"detail": ...}`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidatedJson<T>(pub T);
