use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` with malformed bodies reported as an `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
