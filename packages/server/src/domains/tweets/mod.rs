pub mod activities;
pub mod models;

pub use activities::{fetch_latest_tweet, fetch_tweets, send_contest_tweet};
pub use models::{ContestTweetRequest, Post, PublishResult};
