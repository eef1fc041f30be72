// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (classification, scoring, ranking) lives in domain activities
// that call through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePostSource)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::hints::models::UserAnalysis;
use crate::domains::tweets::models::{Post, PublishResult};
use crate::domains::users::models::RegisteredUser;

// =============================================================================
// AI Trait (Infrastructure - completion service)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt expecting a JSON object back (returns the raw text).
    /// Parse and validate in calling code.
    async fn complete_json(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }
}

// =============================================================================
// Post Source / Publisher Traits (Infrastructure - social platform)
// =============================================================================

#[async_trait]
pub trait BasePostSource: Send + Sync {
    /// Fetch up to `limit` of the account's most recent posts, newest first.
    ///
    /// Error messages must keep the upstream status visible (e.g. "404",
    /// "429") so callers can classify the failure.
    async fn fetch_recent_posts(&self, username: &str, limit: u32) -> Result<Vec<Post>>;
}

#[async_trait]
pub trait BasePostPublisher: Send + Sync {
    /// Publish a post, optionally as a reply to an existing post.
    async fn publish(&self, content: &str, reply_to_id: Option<&str>) -> Result<PublishResult>;
}

// =============================================================================
// Persistence Traits (Infrastructure - full-collection stores)
// =============================================================================

#[async_trait]
pub trait BaseUserRegistry: Send + Sync {
    /// All registered users in registration order.
    async fn list_users(&self) -> Result<Vec<RegisteredUser>>;

    /// Append a user. Returns `false` without writing when the username is taken.
    async fn insert_user(&self, user: RegisteredUser) -> Result<bool>;
}

#[async_trait]
pub trait BaseAnalysisStore: Send + Sync {
    async fn load_analyses(&self) -> Result<Vec<UserAnalysis>>;

    /// Replace the whole collection.
    async fn save_analyses(&self, analyses: &[UserAnalysis]) -> Result<()>;
}
