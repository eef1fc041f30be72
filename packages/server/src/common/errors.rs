use apify_client::ApifyError;
use openai_client::OpenAIError;
use thiserror::Error;

use crate::kernel::XApiError;

/// Suggested back-off after an upstream rate limit (one X API window).
pub const RATE_LIMIT_RETRY_AFTER_SECS: u64 = 15 * 60;

/// Errors surfaced by activities to their callers.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Bad caller input; never retried
    #[error("{0}")]
    Validation(String),

    /// Resource already exists (e.g. a registered username)
    #[error("{0}")]
    Duplicate(String),

    /// Upstream asked us to back off
    #[error("Rate limit exceeded: {message}")]
    UpstreamRateLimited {
        message: String,
        retry_after_secs: u64,
    },

    /// Requested account does not exist upstream; not retryable
    #[error("Not found: {0}")]
    UpstreamNotFound(String),

    /// Completion service output did not match the expected shape.
    /// Converted to fallback values inside the classifier and scorer.
    #[error("Invalid response structure: {0}")]
    Schema(String),

    #[error("{0}")]
    Failure(#[from] anyhow::Error),
}

impl AnalysisError {
    /// Classify an upstream failure.
    ///
    /// Typed client errors anywhere in the chain decide by their HTTP status.
    /// Only errors with no typed cause fall back to status markers in the
    /// message text, such as `(429)` or "rate limit".
    pub fn from_upstream(error: anyhow::Error) -> Self {
        let status = match typed_status(&error) {
            Some(status) => status,
            None => status_from_text(&format!("{:#}", error)),
        };

        match status {
            Some(429) => AnalysisError::UpstreamRateLimited {
                message: format!("{:#}", error),
                retry_after_secs: RATE_LIMIT_RETRY_AFTER_SECS,
            },
            Some(404) => AnalysisError::UpstreamNotFound(format!("{:#}", error)),
            _ => AnalysisError::Failure(error),
        }
    }

    /// Machine-readable kind for API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation_error",
            AnalysisError::Duplicate(_) => "duplicate",
            AnalysisError::UpstreamRateLimited { .. } => "upstream_rate_limited",
            AnalysisError::UpstreamNotFound(_) => "upstream_not_found",
            AnalysisError::Schema(_) => "schema_validation_error",
            AnalysisError::Failure(_) => "generic_failure",
        }
    }

    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            AnalysisError::UpstreamRateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// Status of the first typed client error in the chain. `Some(None)` means a
/// typed error was found but it carried no HTTP status.
fn typed_status(error: &anyhow::Error) -> Option<Option<u16>> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ApifyError>() {
            Some(e.status())
        } else if let Some(e) = cause.downcast_ref::<OpenAIError>() {
            Some(e.status())
        } else {
            cause.downcast_ref::<XApiError>().map(|e| Some(e.status))
        }
    })
}

fn status_from_text(message: &str) -> Option<u16> {
    let lower = message.to_lowercase();
    let has_status = |code: &str| {
        [format!("({code})"), format!("http {code}"), format!("status {code}")]
            .iter()
            .any(|marker| lower.contains(marker.as_str()))
    };

    if has_status("429") || lower.contains("rate limit") || lower.contains("too many requests") {
        Some(429)
    } else if has_status("404") || lower.contains("not found") {
        Some(404)
    } else {
        None
    }
}
