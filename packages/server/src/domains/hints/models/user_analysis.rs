use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HintClassification, HintScore};
use crate::domains::hints::utils::mean_score;

/// One qualifying hint request found in a user's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequestEntry {
    /// Post text exactly as fetched; also the per-post cache key
    pub tweet: String,
    /// Aggregate of `raw_score`
    pub score: f64,
    pub classification: HintClassification,
    pub raw_score: HintScore,
}

/// Latest analysis of one registered user.
///
/// Always built through [`UserAnalysis::from_requests`], which keeps
/// `hint_request_count == requests.len()` and `score` equal to the rounded
/// mean of the request scores (0 when there are none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalysis {
    pub username: String,
    pub score: f64,
    pub total_posts: usize,
    pub hint_request_count: usize,
    pub last_updated: DateTime<Utc>,
    pub requests: Vec<HintRequestEntry>,
}

impl UserAnalysis {
    pub fn from_requests(
        username: impl Into<String>,
        total_posts: usize,
        requests: Vec<HintRequestEntry>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.into(),
            score: mean_score(requests.iter().map(|r| r.score)),
            total_posts,
            hint_request_count: requests.len(),
            last_updated: now,
            requests,
        }
    }

    /// Whether this analysis is younger than `window` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_updated) < window
    }
}
