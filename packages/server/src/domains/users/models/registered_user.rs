use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account whose tweets take part in hint analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl RegisteredUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}
