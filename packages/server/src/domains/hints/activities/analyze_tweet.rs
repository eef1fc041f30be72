use serde::Serialize;

use crate::common::AnalysisError;
use crate::domains::hints::activities::{classify_tweet, score_hint_request};
use crate::domains::hints::models::{HintClassification, HintScore};
use crate::domains::hints::utils::aggregate_score;
use crate::kernel::ServerDeps;

/// Classification of one ad-hoc post, plus its score when it qualifies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetAnalysis {
    pub classification: HintClassification,
    pub raw_score: Option<HintScore>,
    pub score: Option<f64>,
}

/// Run the two-stage pipeline on a single post outside any user analysis.
///
/// Unlike the classifier itself, empty text is rejected up front so the
/// caller gets a 400 rather than a fallback verdict.
pub async fn analyze_tweet(text: &str, deps: &ServerDeps) -> Result<TweetAnalysis, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::Validation("Tweet cannot be empty".into()));
    }

    let classification = classify_tweet(text, deps).await;
    if !classification.qualifies(deps.settings.confidence_threshold) {
        return Ok(TweetAnalysis {
            classification,
            raw_score: None,
            score: None,
        });
    }

    let raw_score = score_hint_request(text, deps).await;
    let score = aggregate_score(&raw_score, &deps.settings.weights);

    Ok(TweetAnalysis {
        classification,
        raw_score: Some(raw_score),
        score: Some(score),
    })
}
