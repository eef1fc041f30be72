use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BasePostPublisher;
use crate::domains::tweets::models::PublishResult;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2";

/// X (Twitter) API v2 client for posting tweets.
///
/// Needs a user-context OAuth 2.0 bearer token with `tweet.write`.
pub struct XClient {
    bearer_token: String,
    base_url: String,
    client: reqwest::Client,
}

/// Non-2xx answer from the X API.
#[derive(Debug, thiserror::Error)]
#[error("X API error ({status}): {body}")]
pub struct XApiError {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<ReplySettings<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplySettings<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
    text: String,
}

impl XClient {
    pub fn new(bearer_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            bearer_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl BasePostPublisher for XClient {
    async fn publish(&self, content: &str, reply_to_id: Option<&str>) -> Result<PublishResult> {
        let request = CreateTweetRequest {
            text: content,
            reply: reply_to_id.map(|id| ReplySettings {
                in_reply_to_tweet_id: id,
            }),
        };

        let response = self
            .client
            .post(format!("{}/tweets", self.base_url))
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await
            .context("Failed to send tweet to X API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %body, "X API rejected tweet");
            return Err(XApiError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let created: CreateTweetResponse = response
            .json()
            .await
            .context("Failed to parse X API response")?;

        tracing::info!(tweet_id = %created.data.id, "Tweet published");

        Ok(PublishResult {
            id: created.data.id,
            text: created.data.text,
            in_reply_to: reply_to_id.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_is_omitted_for_top_level_tweets() {
        let body = serde_json::to_value(CreateTweetRequest {
            text: "hello",
            reply: None,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"text": "hello"}));
    }

    #[test]
    fn reply_target_is_nested() {
        let body = serde_json::to_value(CreateTweetRequest {
            text: "hello",
            reply: Some(ReplySettings {
                in_reply_to_tweet_id: "42",
            }),
        })
        .unwrap();

        assert_eq!(body["reply"]["in_reply_to_tweet_id"], "42");
    }
}
