//! Per-user analysis: fetch, classify, score, aggregate.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::common::AnalysisError;
use crate::domains::hints::activities::{classify_tweet, score_hint_request};
use crate::domains::hints::models::{HintRequestEntry, UserAnalysis};
use crate::domains::hints::utils::aggregate_score;
use crate::domains::tweets::activities::fetch_tweets::post_source;
use crate::kernel::ServerDeps;

/// Analyze `username` as of now. See [`analyze_user_at`].
pub async fn analyze_user(
    username: &str,
    prior: Option<&UserAnalysis>,
    deps: &ServerDeps,
) -> Result<UserAnalysis, AnalysisError> {
    analyze_user_at(username, prior, Utc::now(), deps).await
}

/// Analyze `username` as of `now`.
///
/// - A prior analysis younger than the freshness window is returned as-is,
///   with no fetch and no completion calls.
/// - Otherwise up to `posts_per_user` recent posts are fetched. Each post
///   whose text the cache policy finds among the prior requests reuses that
///   entry; the rest are classified, and qualifying ones scored.
/// - Non-qualifying posts count toward `total_posts` only.
///
/// Only fetch failures are returned; classification and scoring failures
/// resolve to fallback values.
pub async fn analyze_user_at(
    username: &str,
    prior: Option<&UserAnalysis>,
    now: DateTime<Utc>,
    deps: &ServerDeps,
) -> Result<UserAnalysis, AnalysisError> {
    let settings = &deps.settings;

    if let Some(prior) = prior {
        if prior.is_fresh(now, settings.freshness_window()) {
            debug!(username, last_updated = %prior.last_updated, "Analysis still fresh, skipping");
            return Ok(prior.clone());
        }
    }

    let posts = post_source(deps)?
        .fetch_recent_posts(username, settings.posts_per_user)
        .await
        .map_err(AnalysisError::from_upstream)?;

    let prior_requests = prior.map(|p| p.requests.as_slice()).unwrap_or_default();
    let mut requests = Vec::new();

    for post in &posts {
        if let Some(cached) = deps.post_cache.find(&post.text, prior_requests) {
            debug!(username, post_id = %post.id, "Reusing cached hint result");
            requests.push(HintRequestEntry {
                tweet: post.text.clone(),
                ..cached.clone()
            });
            continue;
        }

        let classification = classify_tweet(&post.text, deps).await;
        if !classification.qualifies(settings.confidence_threshold) {
            continue;
        }

        let raw_score = score_hint_request(&post.text, deps).await;
        let score = aggregate_score(&raw_score, &settings.weights);
        debug!(username, post_id = %post.id, score, "Scored hint request");

        requests.push(HintRequestEntry {
            tweet: post.text.clone(),
            score,
            classification,
            raw_score,
        });
    }

    let analysis = UserAnalysis::from_requests(username, posts.len(), requests, now);
    info!(
        username,
        total_posts = analysis.total_posts,
        hint_requests = analysis.hint_request_count,
        score = analysis.score,
        "User analyzed"
    );

    Ok(analysis)
}
