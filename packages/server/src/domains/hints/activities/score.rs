//! Stage two of the hint pipeline: how good is the request?

use tracing::warn;

use crate::common::AnalysisError;
use crate::domains::hints::models::HintScore;
use crate::kernel::ServerDeps;

/// Rate a post already classified as a hint request.
///
/// Never fails: any error yields [`HintScore::neutral`] carrying the reason.
/// Output is validated like the classifier's, so an out-of-range or
/// mistyped dimension also lands on the neutral score.
pub async fn score_hint_request(text: &str, deps: &ServerDeps) -> HintScore {
    match try_score(text, deps).await {
        Ok(score) => score,
        Err(e) => {
            warn!(error = %e, "Hint scoring failed, using neutral score");
            HintScore::neutral(e.to_string())
        }
    }
}

async fn try_score(text: &str, deps: &ServerDeps) -> Result<HintScore, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::Validation("Tweet cannot be empty".into()));
    }

    let raw = deps.complete_json(&scoring_prompt(text)).await?;
    HintScore::from_completion(&raw)
}

fn scoring_prompt(text: &str) -> String {
    format!(
        r#"Score this hint request tweet:
Tweet: "{}"

Evaluate:
1. Clarity of the request
2. Specificity of what help is needed
3. Context provided
4. Effort in explaining the need

Respond only with this JSON format:
{{
    "clarity": 0-10,
    "specificity": 0-10,
    "context": 0-10,
    "effort": 0-10,
    "explanation": "brief explanation of scores"
}}"#,
        text.replace('"', "\\\"")
    )
}
