use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApifyError>;

#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Apify API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Actor run ended with status {0}")]
    RunFailed(String),
}

impl ApifyError {
    /// HTTP status behind the failure, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApifyError::Api { status, .. } => Some(*status),
            ApifyError::Http(e) => e.status().map(|s| s.as_u16()),
            ApifyError::RunFailed(_) => None,
        }
    }
}
