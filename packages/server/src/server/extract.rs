//! JSON body extractor whose rejections use the service's error body.

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::common::AnalysisError;

/// `axum::Json` with malformed, mistyped or non-JSON bodies answered as a
/// 400 `validation_error` instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AnalysisError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AnalysisError {
    fn from(rejection: JsonRejection) -> Self {
        AnalysisError::Validation(rejection.body_text())
    }
}
