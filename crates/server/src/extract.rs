//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections become `{"message": ...}` 400s.
///
/// Covers malformed JSON, a missing `Content-Type: application/json`, and
/// fields of the wrong type.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
