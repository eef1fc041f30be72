pub mod analyze_tweet;
pub mod analyze_user;
pub mod classify;
pub mod run_batch;
pub mod score;

pub use analyze_tweet::{analyze_tweet, TweetAnalysis};
pub use analyze_user::{analyze_user, analyze_user_at};
pub use classify::classify_tweet;
pub use run_batch::{analyze_all_users, run_batch};
pub use score::score_hint_request;
