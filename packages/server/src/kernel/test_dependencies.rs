// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BaseAI, BaseAnalysisStore, BasePostPublisher, BasePostSource, BaseUserRegistry, ServerDeps,
};
use crate::config::AnalysisSettings;
use crate::domains::hints::cache::{ExactTextMatch, PostCachePolicy};
use crate::domains::hints::models::UserAnalysis;
use crate::domains::tweets::models::{Post, PublishResult};
use crate::domains::users::models::RegisteredUser;

// =============================================================================
// Mock AI (completion service)
// =============================================================================

enum MockReply {
    Text(String),
    Fail(String),
    Hang,
}

pub struct MockAI {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.push(MockReply::Text(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.push(MockReply::Text(json));
        self
    }

    /// Queue a failed call
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Fail(message.into()));
        self
    }

    /// Queue a call that never returns
    pub fn with_hang(self) -> Self {
        self.push(MockReply::Hang);
        self
    }

    /// Get all prompts that were sent to the AI
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|p| p.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail(message)) => Err(anyhow::anyhow!(message)),
            Some(MockReply::Hang) => std::future::pending().await,
            None => Ok("Mock AI response".to_string()),
        }
    }
}

// =============================================================================
// Mock Post Source
// =============================================================================

pub struct MockPostSource {
    timelines: Arc<Mutex<HashMap<String, std::result::Result<Vec<Post>, String>>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockPostSource {
    pub fn new() -> Self {
        Self {
            timelines: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Give a user a timeline, newest first
    pub fn with_posts(self, username: &str, texts: &[&str]) -> Self {
        let posts = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Post {
                id: format!("{}-{}", username, i + 1),
                text: text.to_string(),
                username: Some(username.to_string()),
                url: None,
                created_at: None,
            })
            .collect();
        self.timelines
            .lock()
            .unwrap()
            .insert(username.to_string(), Ok(posts));
        self
    }

    /// Make fetches for a user fail with the given message
    pub fn with_error(self, username: &str, message: &str) -> Self {
        self.timelines
            .lock()
            .unwrap()
            .insert(username.to_string(), Err(message.to_string()));
        self
    }

    /// Get all (username, limit) pairs that were fetched
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockPostSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePostSource for MockPostSource {
    async fn fetch_recent_posts(&self, username: &str, limit: u32) -> Result<Vec<Post>> {
        self.calls
            .lock()
            .unwrap()
            .push((username.to_string(), limit));

        match self.timelines.lock().unwrap().get(username) {
            Some(Ok(posts)) => Ok(posts.iter().take(limit as usize).cloned().collect()),
            Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
            None => Err(anyhow::anyhow!("User not found: {} (404)", username)),
        }
    }
}

// =============================================================================
// Mock Post Publisher
// =============================================================================

pub struct MockPublisher {
    published: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all (content, reply_to) pairs that were published
    pub fn published(&self) -> Vec<(String, Option<String>)> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePostPublisher for MockPublisher {
    async fn publish(&self, content: &str, reply_to_id: Option<&str>) -> Result<PublishResult> {
        let mut published = self.published.lock().unwrap();
        published.push((content.to_string(), reply_to_id.map(str::to_string)));

        Ok(PublishResult {
            id: format!("mock-{}", published.len()),
            text: content.to_string(),
            in_reply_to: reply_to_id.map(str::to_string),
        })
    }
}

// =============================================================================
// In-memory stores
// =============================================================================

pub struct InMemoryUserRegistry {
    users: Mutex<Vec<RegisteredUser>>,
}

impl InMemoryUserRegistry {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// Pre-register users in the given order
    pub fn with_users(self, usernames: &[&str]) -> Self {
        self.users
            .lock()
            .unwrap()
            .extend(usernames.iter().map(|u| RegisteredUser::new(*u)));
        self
    }
}

impl Default for InMemoryUserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUserRegistry for InMemoryUserRegistry {
    async fn list_users(&self) -> Result<Vec<RegisteredUser>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn insert_user(&self, user: RegisteredUser) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Ok(false);
        }
        users.push(user);
        Ok(true)
    }
}

pub struct InMemoryAnalysisStore {
    analyses: Mutex<Vec<UserAnalysis>>,
    saves: Mutex<usize>,
    fail_writes: bool,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self {
            analyses: Mutex::new(Vec::new()),
            saves: Mutex::new(0),
            fail_writes: false,
        }
    }

    /// Seed prior results
    pub fn with_analyses(self, analyses: Vec<UserAnalysis>) -> Self {
        *self.analyses.lock().unwrap() = analyses;
        self
    }

    /// Make every save fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current contents
    pub fn snapshot(&self) -> Vec<UserAnalysis> {
        self.analyses.lock().unwrap().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl Default for InMemoryAnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAnalysisStore for InMemoryAnalysisStore {
    async fn load_analyses(&self) -> Result<Vec<UserAnalysis>> {
        Ok(self.snapshot())
    }

    async fn save_analyses(&self, analyses: &[UserAnalysis]) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Disk full while writing analysis store");
        }
        *self.analyses.lock().unwrap() = analyses.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub post_source: Arc<MockPostSource>,
    pub publisher: Arc<MockPublisher>,
    pub user_registry: Arc<InMemoryUserRegistry>,
    pub analysis_store: Arc<InMemoryAnalysisStore>,
    pub post_cache: Arc<dyn PostCachePolicy>,
    pub settings: AnalysisSettings,
    pub completion_timeout: Duration,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            post_source: Arc::new(MockPostSource::new()),
            publisher: Arc::new(MockPublisher::new()),
            user_registry: Arc::new(InMemoryUserRegistry::new()),
            analysis_store: Arc::new(InMemoryAnalysisStore::new()),
            post_cache: Arc::new(ExactTextMatch),
            settings: AnalysisSettings::default(),
            completion_timeout: Duration::from_secs(5),
        }
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    /// Set a mock post source
    pub fn mock_posts(mut self, source: MockPostSource) -> Self {
        self.post_source = Arc::new(source);
        self
    }

    /// Set the registered users
    pub fn mock_users(mut self, registry: InMemoryUserRegistry) -> Self {
        self.user_registry = Arc::new(registry);
        self
    }

    /// Set the analysis store
    pub fn mock_analyses(mut self, store: InMemoryAnalysisStore) -> Self {
        self.analysis_store = Arc::new(store);
        self
    }

    /// Set the per-post cache policy
    pub fn post_cache(mut self, policy: impl PostCachePolicy + 'static) -> Self {
        self.post_cache = Arc::new(policy);
        self
    }

    /// Override analysis settings
    pub fn settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the completion timeout
    pub fn completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    /// Build ServerDeps sharing these mocks
    pub fn into_server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.ai.clone(),
            Some(self.post_source.clone() as Arc<dyn BasePostSource>),
            Some(self.publisher.clone() as Arc<dyn BasePostPublisher>),
            self.user_registry.clone(),
            self.analysis_store.clone(),
            self.post_cache.clone(),
            self.settings.clone(),
            self.completion_timeout,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
