//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container used by every
//! activity. All external services use trait abstractions so tests can swap
//! in the mocks from `test_dependencies`.

use anyhow::{Context, Result};
use apify_client::ApifyClient;
use openai_client::OpenAIClient;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AnalysisSettings, Config, PostCachePolicyKind};
use crate::domains::hints::cache::{ExactTextMatch, NormalizedHashMatch, PostCachePolicy};
use crate::domains::hints::models::UserAnalysis;
use crate::domains::users::models::RegisteredUser;
use crate::kernel::json_store::{JsonFileStore, ANALYSIS_FILE, USERS_FILE};
use crate::kernel::{
    ApifyPostSource, BaseAI, BaseAnalysisStore, BasePostPublisher, BasePostSource,
    BaseUserRegistry, OpenAiCompletion, XClient,
};

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    /// Completion service used for classification, scoring and tweet copy
    pub ai: Arc<dyn BaseAI>,
    /// Tweet fetcher (optional - not all envs have scraper credentials)
    pub post_source: Option<Arc<dyn BasePostSource>>,
    /// Tweet publisher (optional - not all envs can post)
    pub publisher: Option<Arc<dyn BasePostPublisher>>,
    pub user_registry: Arc<dyn BaseUserRegistry>,
    pub analysis_store: Arc<dyn BaseAnalysisStore>,
    /// How prior per-post results are matched against freshly fetched posts
    pub post_cache: Arc<dyn PostCachePolicy>,
    pub settings: AnalysisSettings,
    /// Upper bound on a single completion-service call
    pub completion_timeout: Duration,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ai: Arc<dyn BaseAI>,
        post_source: Option<Arc<dyn BasePostSource>>,
        publisher: Option<Arc<dyn BasePostPublisher>>,
        user_registry: Arc<dyn BaseUserRegistry>,
        analysis_store: Arc<dyn BaseAnalysisStore>,
        post_cache: Arc<dyn PostCachePolicy>,
        settings: AnalysisSettings,
        completion_timeout: Duration,
    ) -> Self {
        Self {
            ai,
            post_source,
            publisher,
            user_registry,
            analysis_store,
            post_cache,
            settings,
            completion_timeout,
        }
    }

    /// Wire production adapters from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let openai = OpenAIClient::new(config.openai_api_key.clone())
            .with_base_url(config.completion_base_url.clone());
        let ai: Arc<dyn BaseAI> =
            Arc::new(OpenAiCompletion::new(openai, config.completion_model.clone()));

        let post_source: Option<Arc<dyn BasePostSource>> =
            config.apify_api_token.clone().map(|token| {
                Arc::new(ApifyPostSource::new(Arc::new(ApifyClient::new(token))))
                    as Arc<dyn BasePostSource>
            });
        if post_source.is_none() {
            tracing::warn!("APIFY_API_TOKEN not set, tweet fetching and analysis are disabled");
        }

        let publisher: Option<Arc<dyn BasePostPublisher>> = match config.x_bearer_token.clone() {
            Some(token) => Some(Arc::new(
                XClient::new(token).context("Failed to create X client")?,
            ) as Arc<dyn BasePostPublisher>),
            None => {
                tracing::warn!("X_BEARER_TOKEN not set, tweet posting is disabled");
                None
            }
        };

        let user_registry: Arc<dyn BaseUserRegistry> = Arc::new(
            JsonFileStore::<RegisteredUser>::new(config.data_dir.join(USERS_FILE)),
        );
        let analysis_store: Arc<dyn BaseAnalysisStore> = Arc::new(
            JsonFileStore::<UserAnalysis>::new(config.data_dir.join(ANALYSIS_FILE)),
        );

        let post_cache: Arc<dyn PostCachePolicy> = match config.post_cache_policy {
            PostCachePolicyKind::Exact => Arc::new(ExactTextMatch),
            PostCachePolicyKind::Normalized => Arc::new(NormalizedHashMatch),
        };

        Ok(Self::new(
            ai,
            post_source,
            publisher,
            user_registry,
            analysis_store,
            post_cache,
            config.analysis.clone(),
            config.completion_timeout,
        ))
    }

    /// JSON-mode completion bounded by `completion_timeout`.
    pub async fn complete_json(&self, prompt: &str) -> Result<String> {
        self.bounded(self.ai.complete_json(prompt)).await
    }

    /// Free-text completion bounded by `completion_timeout`.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        self.bounded(self.ai.complete(prompt)).await
    }

    async fn bounded(&self, call: impl Future<Output = Result<String>>) -> Result<String> {
        match tokio::time::timeout(self.completion_timeout, call).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!(
                "Completion service timed out after {}s",
                self.completion_timeout.as_secs_f64()
            ),
        }
    }
}
