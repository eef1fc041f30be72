use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the apidojo/tweet-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct TweetScraperInput {
    #[serde(rename = "twitterHandles")]
    pub twitter_handles: Vec<String>,
    #[serde(rename = "maxItems")]
    pub max_items: u32,
    /// "Latest" returns the timeline newest-first.
    pub sort: String,
}

/// A single dataset item from the tweet scraper.
///
/// The actor pads empty result sets with `{"noResults": true}` items, so every
/// field is optional and callers should go through [`ScrapedTweet::is_tweet`].
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapedTweet {
    pub id: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    pub author: Option<TweetAuthor>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<i64>,
    #[serde(rename = "replyCount")]
    pub reply_count: Option<i64>,
    #[serde(rename = "retweetCount")]
    pub retweet_count: Option<i64>,
    #[serde(rename = "isReply")]
    pub is_reply: Option<bool>,
    #[serde(rename = "noResults", default)]
    pub no_results: bool,
}

impl ScrapedTweet {
    pub fn is_tweet(&self) -> bool {
        !self.no_results && self.id.is_some() && self.text.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetAuthor {
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
    pub name: Option<String>,
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
