use std::sync::Arc;

use crate::common::AnalysisError;
use crate::domains::tweets::models::Post;
use crate::kernel::{BasePostSource, ServerDeps};

/// Page size when the caller does not ask for one.
pub const DEFAULT_MAX_TWEETS: u32 = 10;

/// Fetch a user's most recent tweets, newest first.
pub async fn fetch_tweets(
    user: &str,
    max_tweets: Option<u32>,
    deps: &ServerDeps,
) -> Result<Vec<Post>, AnalysisError> {
    let user = require_user(user)?;
    let source = post_source(deps)?;
    let limit = max_tweets.filter(|n| *n > 0).unwrap_or(DEFAULT_MAX_TWEETS);

    let posts = source
        .fetch_recent_posts(user, limit)
        .await
        .map_err(AnalysisError::from_upstream)?;

    tracing::info!(user, count = posts.len(), "Fetched tweets");
    Ok(posts)
}

/// Fetch a user's newest tweet, if any.
pub async fn fetch_latest_tweet(
    user: &str,
    deps: &ServerDeps,
) -> Result<Option<Post>, AnalysisError> {
    Ok(fetch_tweets(user, Some(1), deps).await?.into_iter().next())
}

pub(crate) fn require_user(user: &str) -> Result<&str, AnalysisError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(AnalysisError::Validation("User is required".into()));
    }
    Ok(user)
}

pub(crate) fn post_source(deps: &ServerDeps) -> Result<&Arc<dyn BasePostSource>, AnalysisError> {
    deps.post_source
        .as_ref()
        .ok_or_else(|| AnalysisError::Failure(anyhow::anyhow!("Post source not configured")))
}
