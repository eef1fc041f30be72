use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::AnalysisError;
use crate::domains::hints::{self, BatchReport, TweetAnalysis};
use crate::server::app::AppState;
use crate::server::{ApiJson, ApiResponse};

/// Run a batch analysis over every registered user.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<BatchReport>, AnalysisError> {
    Ok(Json(hints::analyze_all_users(&state.deps).await?))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTweetBody {
    #[serde(default)]
    pub tweet: String,
}

pub async fn analyze_tweet_handler(
    Extension(state): Extension<AppState>,
    ApiJson(body): ApiJson<AnalyzeTweetBody>,
) -> Result<Json<ApiResponse<TweetAnalysis>>, AnalysisError> {
    let analysis = hints::analyze_tweet(&body.tweet, &state.deps).await?;
    Ok(Json(ApiResponse::ok("Tweet analyzed successfully", analysis)))
}
