//! Batch analysis over every registered user.

use std::time::Instant;

use anyhow::Context;
use tracing::{info, warn};

use crate::common::AnalysisError;
use crate::domains::hints::activities::analyze_user;
use crate::domains::hints::models::{build_leaderboard, BatchReport, UserAnalysis};
use crate::domains::users::models::RegisteredUser;
use crate::kernel::ServerDeps;

/// Analyze `users` in registration order and rank the results.
///
/// Users and their posts are processed one at a time. The full result set
/// replaces whatever the analysis store held; analyses of users no longer
/// registered are dropped.
///
/// A user the post source no longer knows is skipped with a warning; their
/// prior analysis is carried over when there is one. Any other per-user
/// fetch error or a store failure aborts the run before anything is saved.
pub async fn run_batch(
    users: &[RegisteredUser],
    prior: Vec<UserAnalysis>,
    deps: &ServerDeps,
) -> Result<BatchReport, AnalysisError> {
    let started = Instant::now();
    info!(users = users.len(), "Starting hint analysis batch");

    let mut results = Vec::with_capacity(users.len());
    for user in users {
        let previous = prior.iter().find(|a| a.username == user.username);
        match analyze_user(&user.username, previous, deps).await {
            Ok(analysis) => results.push(analysis),
            Err(AnalysisError::UpstreamNotFound(message)) => {
                warn!(
                    username = %user.username,
                    kept_prior = previous.is_some(),
                    error = %message,
                    "Skipping user unknown to the post source"
                );
                results.extend(previous.cloned());
            }
            Err(e) => return Err(e),
        }
    }

    deps.analysis_store
        .save_analyses(&results)
        .await
        .context("Failed to save analysis results")?;

    let total_users = results.len();
    let leaderboard = build_leaderboard(results);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    info!(total_users, elapsed_ms, "Hint analysis batch complete");

    Ok(BatchReport {
        leaderboard,
        total_users,
        elapsed_ms,
    })
}

/// Load registered users and stored analyses, then [`run_batch`].
pub async fn analyze_all_users(deps: &ServerDeps) -> Result<BatchReport, AnalysisError> {
    let users = deps
        .user_registry
        .list_users()
        .await
        .context("Failed to load registered users")?;
    let prior = deps
        .analysis_store
        .load_analyses()
        .await
        .context("Failed to load prior analyses")?;

    run_batch(&users, prior, deps).await
}
