use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// `axum::extract::Query` with unparsable query strings reported as an
/// `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
