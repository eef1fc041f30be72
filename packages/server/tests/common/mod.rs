//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use server_core::domains::hints::models::{
    HintClassification, HintRequestEntry, HintScore, HintType, UserAnalysis,
};

/// Classifier completion flagging a hint request.
pub fn hint_request(confidence: f64) -> Value {
    json!({
        "isHintRequest": true,
        "confidence": confidence,
        "type": "hint",
        "analysis": "asks for a hint"
    })
}

/// Classifier completion for an ordinary post.
pub fn not_a_request() -> Value {
    json!({
        "isHintRequest": false,
        "confidence": 2,
        "type": "none",
        "analysis": "small talk"
    })
}

/// Scorer completion.
pub fn score(clarity: f64, specificity: f64, context: f64, effort: f64) -> Value {
    json!({
        "clarity": clarity,
        "specificity": specificity,
        "context": context,
        "effort": effort,
        "explanation": "scored"
    })
}

/// A stored request entry for `tweet` with the given aggregate.
pub fn cached_entry(tweet: &str, aggregate: f64) -> HintRequestEntry {
    HintRequestEntry {
        tweet: tweet.to_string(),
        score: aggregate,
        classification: HintClassification {
            is_hint_request: true,
            confidence: 9.0,
            hint_type: HintType::Help,
            analysis: "cached".to_string(),
        },
        raw_score: HintScore {
            clarity: 9.0,
            specificity: 9.0,
            context: 9.0,
            effort: 9.0,
            explanation: "cached".to_string(),
        },
    }
}

/// A stored analysis whose score is forced to `score`.
pub fn analysis_with_score(username: &str, score: f64, last_updated: DateTime<Utc>) -> UserAnalysis {
    let mut analysis = UserAnalysis::from_requests(username, 0, Vec::new(), last_updated);
    analysis.score = score;
    analysis
}
