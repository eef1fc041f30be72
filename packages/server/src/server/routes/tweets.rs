use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::AnalysisError;
use crate::domains::tweets::{self, ContestTweetRequest, Post, PublishResult};
use crate::server::app::AppState;
use crate::server::{ApiJson, ApiResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTweetsBody {
    #[serde(default)]
    pub user: String,
    pub max_tweets: Option<u32>,
}

pub async fn fetch_tweets_handler(
    Extension(state): Extension<AppState>,
    ApiJson(body): ApiJson<FetchTweetsBody>,
) -> Result<Json<ApiResponse<Vec<Post>>>, AnalysisError> {
    let posts = tweets::fetch_tweets(&body.user, body.max_tweets, &state.deps).await?;
    Ok(Json(ApiResponse::ok("Tweets fetched successfully", posts)))
}

pub async fn fetch_latest_tweet_handler(
    Extension(state): Extension<AppState>,
    ApiJson(body): ApiJson<FetchTweetsBody>,
) -> Result<Json<ApiResponse<Option<Post>>>, AnalysisError> {
    let post = tweets::fetch_latest_tweet(&body.user, &state.deps).await?;
    Ok(Json(ApiResponse::ok("Latest tweet fetched successfully", post)))
}

pub async fn send_tweet_handler(
    Extension(state): Extension<AppState>,
    ApiJson(body): ApiJson<ContestTweetRequest>,
) -> Result<Json<ApiResponse<PublishResult>>, AnalysisError> {
    let result = tweets::send_contest_tweet(&body, &state.deps).await?;
    Ok(Json(ApiResponse::ok("Tweet sent successfully", result)))
}
