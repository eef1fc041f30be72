pub mod classification;
pub mod hint_score;
pub mod leaderboard;
pub mod user_analysis;

pub use classification::{HintClassification, HintType};
pub use hint_score::HintScore;
pub use leaderboard::{build_leaderboard, BatchReport, LeaderboardEntry};
pub use user_analysis::{HintRequestEntry, UserAnalysis};
