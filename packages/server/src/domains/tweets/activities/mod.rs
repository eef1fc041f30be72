pub mod fetch_tweets;
pub mod send_contest_tweet;

pub use fetch_tweets::{fetch_latest_tweet, fetch_tweets};
pub use send_contest_tweet::{clean_generated_tweet, send_contest_tweet};
