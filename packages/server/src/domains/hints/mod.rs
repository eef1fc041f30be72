pub mod activities;
pub mod cache;
pub mod models;
pub mod utils;

pub use activities::{
    analyze_all_users, analyze_tweet, analyze_user, analyze_user_at, classify_tweet, run_batch,
    score_hint_request, TweetAnalysis,
};
pub use cache::{ExactTextMatch, NormalizedHashMatch, PostCachePolicy};
pub use models::{
    BatchReport, HintClassification, HintRequestEntry, HintScore, HintType, LeaderboardEntry,
    UserAnalysis,
};
