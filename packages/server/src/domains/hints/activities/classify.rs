//! Stage one of the hint pipeline: is this post asking for help?

use tracing::warn;

use crate::common::AnalysisError;
use crate::domains::hints::models::HintClassification;
use crate::kernel::ServerDeps;

/// Classify a single post.
///
/// Never fails: empty text, completion errors, timeouts and malformed output
/// all collapse to [`HintClassification::fallback`] with the reason in
/// `analysis`.
pub async fn classify_tweet(text: &str, deps: &ServerDeps) -> HintClassification {
    match try_classify(text, deps).await {
        Ok(classification) => classification,
        Err(e) => {
            warn!(error = %e, "Hint classification failed, using fallback");
            HintClassification::fallback(e.to_string())
        }
    }
}

async fn try_classify(text: &str, deps: &ServerDeps) -> Result<HintClassification, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::Validation("Tweet cannot be empty".into()));
    }

    let raw = deps.complete_json(&classification_prompt(text)).await?;
    HintClassification::from_completion(&raw)
}

fn classification_prompt(text: &str) -> String {
    format!(
        r#"Analyze if this tweet is requesting hints, help, or guidance.
Tweet: "{}"

Respond ONLY with a valid JSON object in this exact format:
{{
    "isHintRequest": boolean,
    "confidence": number (0-10),
    "type": "hint" | "help" | "guidance" | "recommendation" | "none",
    "analysis": "brief explanation"
}}"#,
        text.replace('"', "\\\"")
    )
}
