// Post source backed by the Apify tweet scraper

use anyhow::Result;
use apify_client::{ApifyClient, ApifyError, ScrapedTweet};
use async_trait::async_trait;
use std::sync::Arc;

use super::BasePostSource;
use crate::domains::tweets::models::Post;

pub struct ApifyPostSource {
    client: Arc<ApifyClient>,
}

impl ApifyPostSource {
    pub fn new(client: Arc<ApifyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BasePostSource for ApifyPostSource {
    async fn fetch_recent_posts(&self, username: &str, limit: u32) -> Result<Vec<Post>> {
        let tweets = self
            .client
            .scrape_tweets(username, limit)
            .await
            .map_err(|e| describe_error(username, e))?;

        Ok(tweets.into_iter().filter_map(to_post).collect())
    }
}

/// Keep the typed client error in the chain so its status can be read back.
fn describe_error(username: &str, error: ApifyError) -> anyhow::Error {
    anyhow::Error::new(error).context(format!("Tweet scrape failed for {}", username))
}

fn to_post(tweet: ScrapedTweet) -> Option<Post> {
    Some(Post {
        id: tweet.id?,
        text: tweet.text?,
        username: tweet.author.and_then(|a| a.user_name),
        url: tweet.url,
        created_at: tweet.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_survives_in_error_chain() {
        let err = describe_error(
            "ghost",
            ApifyError::Api {
                status: 404,
                message: "no such handle".into(),
            },
        );

        assert_eq!(err.to_string(), "Tweet scrape failed for ghost");
        let apify = err.downcast_ref::<ApifyError>().unwrap();
        assert_eq!(apify.status(), Some(404));
    }

    #[test]
    fn failed_runs_have_no_status() {
        let err = describe_error("alice", ApifyError::RunFailed("ABORTED".into()));

        assert_eq!(err.downcast_ref::<ApifyError>().unwrap().status(), None);
        assert!(format!("{:#}", err).contains("ABORTED"));
    }

    #[test]
    fn placeholder_items_are_dropped() {
        let item: ScrapedTweet = serde_json::from_str(r#"{"noResults": true}"#).unwrap();
        assert!(to_post(item).is_none());
    }
}
