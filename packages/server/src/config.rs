use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub completion_timeout: Duration,
    pub apify_api_token: Option<String>,
    pub x_bearer_token: Option<String>,
    pub data_dir: PathBuf,
    pub post_cache_policy: PostCachePolicyKind,
    pub analysis: AnalysisSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = AnalysisSettings::default();
        let analysis = AnalysisSettings {
            posts_per_user: parse_or("POSTS_PER_USER", defaults.posts_per_user)?,
            confidence_threshold: parse_or(
                "HINT_CONFIDENCE_THRESHOLD",
                defaults.confidence_threshold,
            )?,
            freshness_window_hours: parse_or(
                "FRESHNESS_WINDOW_HOURS",
                defaults.freshness_window_hours,
            )?,
            weights: ScoreWeights {
                clarity: parse_or("WEIGHT_CLARITY", defaults.weights.clarity)?,
                specificity: parse_or("WEIGHT_SPECIFICITY", defaults.weights.specificity)?,
                context: parse_or("WEIGHT_CONTEXT", defaults.weights.context)?,
                effort: parse_or("WEIGHT_EFFORT", defaults.weights.effort)?,
            },
        };
        analysis.validate().context("Invalid analysis settings")?;

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            completion_base_url: env::var("COMPLETION_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            completion_timeout: Duration::from_secs(parse_or("COMPLETION_TIMEOUT_SECS", 30)?),
            apify_api_token: env::var("APIFY_API_TOKEN").ok(),
            x_bearer_token: env::var("X_BEARER_TOKEN").ok(),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            post_cache_policy: parse_or("POST_CACHE_POLICY", PostCachePolicyKind::Exact)?,
            analysis,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Knobs of the hint-analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Recent posts fetched per user on a stale analysis
    pub posts_per_user: u32,
    /// Minimum classifier confidence (0-10) for a post to be scored
    pub confidence_threshold: f64,
    /// Age after which a stored analysis is re-fetched
    pub freshness_window_hours: i64,
    pub weights: ScoreWeights,
}

/// Longest accepted freshness window, ten years.
pub const MAX_FRESHNESS_WINDOW_HOURS: i64 = 87_600;

impl AnalysisSettings {
    /// Reject values that would make scores or cache ages meaningless.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (name, value) in [
            ("WEIGHT_CLARITY", w.clarity),
            ("WEIGHT_SPECIFICITY", w.specificity),
            ("WEIGHT_CONTEXT", w.context),
            ("WEIGHT_EFFORT", w.effort),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{name} must be a finite, non-negative number (got {value})"
            );
        }
        ensure!(
            (0.0..=10.0).contains(&self.confidence_threshold),
            "HINT_CONFIDENCE_THRESHOLD must be between 0 and 10 (got {})",
            self.confidence_threshold
        );
        ensure!(
            (0..=MAX_FRESHNESS_WINDOW_HOURS).contains(&self.freshness_window_hours),
            "FRESHNESS_WINDOW_HOURS must be between 0 and {} (got {})",
            MAX_FRESHNESS_WINDOW_HOURS,
            self.freshness_window_hours
        );
        Ok(())
    }

    pub fn freshness_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.freshness_window_hours)
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            posts_per_user: 2,
            confidence_threshold: 7.0,
            freshness_window_hours: 24,
            weights: ScoreWeights::default(),
        }
    }
}

/// Weights applied to the four hint-score dimensions.
///
/// Changing these changes every aggregate score, so historical results are
/// only comparable under the same weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub clarity: f64,
    pub specificity: f64,
    pub context: f64,
    pub effort: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            clarity: 0.3,
            specificity: 0.3,
            context: 0.2,
            effort: 0.2,
        }
    }
}

/// Which per-post cache lookup the analyzer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCachePolicyKind {
    /// Reuse a prior result only for byte-identical post text
    Exact,
    /// Reuse across case, punctuation and whitespace differences
    Normalized,
}

impl FromStr for PostCachePolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "normalized" => Ok(Self::Normalized),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown post cache policy '{0}' (expected 'exact' or 'normalized')")]
pub struct ParsePolicyError(String);
