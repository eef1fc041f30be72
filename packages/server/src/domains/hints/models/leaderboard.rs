use serde::{Deserialize, Serialize};

use super::UserAnalysis;

/// A user analysis with its 1-based position on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub analysis: UserAnalysis,
}

/// Result of one batch analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub total_users: usize,
    /// Wall-clock duration of the run in milliseconds
    #[serde(rename = "analysisTime")]
    pub elapsed_ms: u64,
}

/// Rank analyses by descending score.
///
/// The sort is stable: equal scores keep their input order.
pub fn build_leaderboard(mut results: Vec<UserAnalysis>) -> Vec<LeaderboardEntry> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    results
        .into_iter()
        .enumerate()
        .map(|(i, analysis)| LeaderboardEntry {
            rank: i + 1,
            analysis,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn analysis(username: &str, score: f64) -> UserAnalysis {
        let mut a = UserAnalysis::from_requests(username, 0, Vec::new(), Utc::now());
        a.score = score;
        a
    }

    #[test]
    fn ranks_descending_and_keeps_tie_order() {
        let board = build_leaderboard(vec![
            analysis("carol", 5.0),
            analysis("alice", 9.2),
            analysis("bob", 9.2),
        ]);

        let ranked: Vec<(usize, &str)> = board
            .iter()
            .map(|e| (e.rank, e.analysis.username.as_str()))
            .collect();
        assert_eq!(ranked, vec![(1, "alice"), (2, "bob"), (3, "carol")]);
    }

    #[test]
    fn empty_input_gives_empty_board() {
        assert!(build_leaderboard(Vec::new()).is_empty());
    }

    #[test]
    fn entry_flattens_analysis_fields() {
        let board = build_leaderboard(vec![analysis("alice", 3.0)]);
        let json = serde_json::to_value(&board[0]).unwrap();

        assert_eq!(json["rank"], 1);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["score"], 3.0);
    }
}
