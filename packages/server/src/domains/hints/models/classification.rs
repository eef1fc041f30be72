use serde::{Deserialize, Serialize};

use crate::common::AnalysisError;

/// What kind of help a post asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintType {
    Hint,
    Help,
    Guidance,
    Recommendation,
    None,
}

/// Classifier verdict for a single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintClassification {
    pub is_hint_request: bool,
    /// 0 (no idea) to 10 (certain)
    pub confidence: f64,
    #[serde(rename = "type")]
    pub hint_type: HintType,
    pub analysis: String,
}

impl HintClassification {
    /// The value returned whenever classification cannot be completed.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            is_hint_request: false,
            confidence: 0.0,
            hint_type: HintType::None,
            analysis: reason.into(),
        }
    }

    /// Parse and validate a raw completion.
    ///
    /// The JSON must carry `isHintRequest` (bool), `confidence` (number in
    /// 0..=10), `type` (one of the five kinds) and `analysis` (string).
    /// Unknown extra keys are ignored.
    pub fn from_completion(raw: &str) -> Result<Self, AnalysisError> {
        let parsed: Self = serde_json::from_str(raw.trim())
            .map_err(|e| AnalysisError::Schema(e.to_string()))?;

        if !parsed.confidence.is_finite() || !(0.0..=10.0).contains(&parsed.confidence) {
            return Err(AnalysisError::Schema(format!(
                "confidence {} is outside 0-10",
                parsed.confidence
            )));
        }

        Ok(parsed)
    }

    /// Whether the post should go on to scoring.
    pub fn qualifies(&self, threshold: f64) -> bool {
        self.is_hint_request && self.confidence >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_completion_parses() {
        let c = HintClassification::from_completion(
            r#"{"isHintRequest": true, "confidence": 8, "type": "hint", "analysis": "asks for a hint"}"#,
        )
        .unwrap();

        assert!(c.is_hint_request);
        assert_eq!(c.confidence, 8.0);
        assert_eq!(c.hint_type, HintType::Hint);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = HintClassification::from_completion(
            r#"{"isHintRequest": true, "confidence": 8, "type": "question", "analysis": ""}"#,
        )
        .unwrap_err();

        assert_eq!(err.kind(), "schema_validation_error");
    }

    #[test]
    fn stringly_typed_fields_are_rejected() {
        assert!(HintClassification::from_completion(
            r#"{"isHintRequest": "yes", "confidence": 8, "type": "hint", "analysis": ""}"#
        )
        .is_err());
        assert!(HintClassification::from_completion(
            r#"{"isHintRequest": true, "confidence": "8", "type": "hint", "analysis": ""}"#
        )
        .is_err());
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        assert!(HintClassification::from_completion(
            r#"{"isHintRequest": true, "confidence": 11, "type": "help", "analysis": ""}"#
        )
        .is_err());
        assert!(HintClassification::from_completion(
            r#"{"isHintRequest": true, "confidence": -1, "type": "help", "analysis": ""}"#
        )
        .is_err());
    }

    #[test]
    fn missing_analysis_is_rejected() {
        assert!(HintClassification::from_completion(
            r#"{"isHintRequest": false, "confidence": 2, "type": "none"}"#
        )
        .is_err());
    }

    #[test]
    fn qualification_needs_flag_and_threshold() {
        let mut c = HintClassification::fallback("x");
        c.is_hint_request = true;
        c.confidence = 7.0;
        assert!(c.qualifies(7.0));

        c.confidence = 6.9;
        assert!(!c.qualifies(7.0));

        c.confidence = 10.0;
        c.is_hint_request = false;
        assert!(!c.qualifies(7.0));
    }
}
