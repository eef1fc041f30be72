//! Error types for the completion client.

use thiserror::Error;

/// Result type for completion client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Completion client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. The status is kept so callers can spot 429s.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx but without any choices
    #[error("Empty response from completion API")]
    EmptyResponse,

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl OpenAIError {
    /// HTTP status of a non-2xx answer, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            OpenAIError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_carries_status() {
        let err = OpenAIError::Api {
            status: 429,
            message: "slow down".into(),
        };

        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "API error (429): slow down");
    }

    #[test]
    fn transport_errors_carry_no_status() {
        assert_eq!(OpenAIError::Network("reset".into()).status(), None);
        assert_eq!(OpenAIError::EmptyResponse.status(), None);
    }
}
