//! HTTP mapping for [`AnalysisError`].

use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::AnalysisError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub kind: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

pub fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
        AnalysisError::Duplicate(_) => StatusCode::CONFLICT,
        AnalysisError::UpstreamRateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        AnalysisError::UpstreamNotFound(_) => StatusCode::NOT_FOUND,
        AnalysisError::Schema(_) | AnalysisError::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            let detail = match &self {
                AnalysisError::Failure(e) => format!("{:#}", e),
                other => other.to_string(),
            };
            tracing::error!(error = %detail, kind = self.kind(), "Request failed");
        } else {
            tracing::warn!(error = %self, kind = self.kind(), "Request rejected");
        }

        let retry_after = self.retry_after_secs();
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            kind: self.kind(),
            timestamp: Utc::now(),
            retry_after,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
