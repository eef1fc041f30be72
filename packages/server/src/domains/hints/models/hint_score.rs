use serde::{Deserialize, Serialize};

use crate::common::AnalysisError;

/// Midpoint used for every dimension when scoring fails.
pub const NEUTRAL_DIMENSION: f64 = 5.0;

/// Scorer ratings (0-10 each) for a post already judged to be a hint request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintScore {
    pub clarity: f64,
    pub specificity: f64,
    pub context: f64,
    pub effort: f64,
    pub explanation: String,
}

impl HintScore {
    /// The value returned whenever scoring cannot be completed.
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self {
            clarity: NEUTRAL_DIMENSION,
            specificity: NEUTRAL_DIMENSION,
            context: NEUTRAL_DIMENSION,
            effort: NEUTRAL_DIMENSION,
            explanation: reason.into(),
        }
    }

    /// Parse and validate a raw completion: four numbers in 0..=10 plus an
    /// explanation string.
    pub fn from_completion(raw: &str) -> Result<Self, AnalysisError> {
        let parsed: Self = serde_json::from_str(raw.trim())
            .map_err(|e| AnalysisError::Schema(e.to_string()))?;

        for (name, value) in parsed.dimensions() {
            if !value.is_finite() || !(0.0..=10.0).contains(&value) {
                return Err(AnalysisError::Schema(format!(
                    "{} {} is outside 0-10",
                    name, value
                )));
            }
        }

        Ok(parsed)
    }

    fn dimensions(&self) -> [(&'static str, f64); 4] {
        [
            ("clarity", self.clarity),
            ("specificity", self.specificity),
            ("context", self.context),
            ("effort", self.effort),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_completion_parses() {
        let s = HintScore::from_completion(
            r#"{"clarity": 8, "specificity": 7.5, "context": 6, "effort": 9, "explanation": "clear ask"}"#,
        )
        .unwrap();

        assert_eq!(s.specificity, 7.5);
        assert_eq!(s.explanation, "clear ask");
    }

    #[test]
    fn out_of_range_dimension_is_rejected() {
        let err = HintScore::from_completion(
            r#"{"clarity": 12, "specificity": 7, "context": 6, "effort": 9, "explanation": ""}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("clarity 12"));
    }

    #[test]
    fn neutral_score_is_all_midpoints() {
        let s = HintScore::neutral("boom");
        assert_eq!(
            [s.clarity, s.specificity, s.context, s.effort],
            [NEUTRAL_DIMENSION; 4]
        );
        assert_eq!(s.explanation, "boom");
    }
}
