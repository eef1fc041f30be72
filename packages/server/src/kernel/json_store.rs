//! JSON-file collections.
//!
//! Each store is one pretty-printed JSON array on disk. All access goes
//! through an async mutex, so inside one process every read-modify-write is
//! single-writer. Separate processes sharing a file can still race.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{BaseAnalysisStore, BaseUserRegistry};
use crate::domains::hints::models::UserAnalysis;
use crate::domains::users::models::RegisteredUser;

pub const USERS_FILE: &str = "users.json";
pub const ANALYSIS_FILE: &str = "analysis.json";

pub struct JsonFileStore<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _items: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn save(&self, items: &[T]) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(items).await
    }

    /// Read, mutate and write back under one lock. The closure's return value
    /// decides whether anything is written.
    pub async fn update<R: Send>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> (R, bool) + Send,
    ) -> Result<R> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let (result, changed) = f(&mut items);
        if changed {
            self.write(&items).await?;
        }
        Ok(result)
    }

    async fn read(&self) -> Result<Vec<T>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt JSON in {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // First run: materialise an empty collection
                self.write(&[]).await?;
                Ok(Vec::new())
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        }
    }

    async fn write(&self, items: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(items).context("Failed to serialize store")?;

        // Write-then-rename so readers never see a half-written file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl BaseUserRegistry for JsonFileStore<RegisteredUser> {
    async fn list_users(&self) -> Result<Vec<RegisteredUser>> {
        self.load().await
    }

    async fn insert_user(&self, user: RegisteredUser) -> Result<bool> {
        self.update(move |users| {
            if users.iter().any(|u| u.username == user.username) {
                return (false, false);
            }
            users.push(user);
            (true, true)
        })
        .await
    }
}

#[async_trait]
impl BaseAnalysisStore for JsonFileStore<UserAnalysis> {
    async fn load_analyses(&self) -> Result<Vec<UserAnalysis>> {
        self.load().await
    }

    async fn save_analyses(&self, analyses: &[UserAnalysis]) -> Result<()> {
        self.save(analyses).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hint-board-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn missing_file_is_created_empty() {
        let store: JsonFileStore<RegisteredUser> = JsonFileStore::new(temp_path(USERS_FILE));

        let users = store.list_users().await.unwrap();

        assert!(users.is_empty());
        let on_disk = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(on_disk.trim(), "[]");
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let store: JsonFileStore<RegisteredUser> = JsonFileStore::new(temp_path(USERS_FILE));
        let alice = RegisteredUser {
            username: "alice".into(),
            created_at: Utc::now(),
        };

        assert!(store.insert_user(alice.clone()).await.unwrap());
        assert!(!store.insert_user(alice).await.unwrap());
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_overwrites_the_collection() {
        let store: JsonFileStore<UserAnalysis> = JsonFileStore::new(temp_path(ANALYSIS_FILE));
        let now = Utc::now();

        store
            .save_analyses(&[
                UserAnalysis::from_requests("alice", 2, Vec::new(), now),
                UserAnalysis::from_requests("bob", 2, Vec::new(), now),
            ])
            .await
            .unwrap();
        store
            .save_analyses(&[UserAnalysis::from_requests("carol", 1, Vec::new(), now)])
            .await
            .unwrap();

        let loaded = store.load_analyses().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].username, "carol");
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = temp_path(ANALYSIS_FILE);
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "{not json").await.unwrap();
        let store: JsonFileStore<UserAnalysis> = JsonFileStore::new(path);

        assert!(store.load_analyses().await.is_err());
    }
}
