//! Per-post result reuse
//!
//! When a stale user is re-analyzed, posts already seen in the prior analysis
//! keep their stored classification and score instead of going back to the
//! completion service. How "already seen" is decided is a policy.

use sha2::{Digest, Sha256};

use crate::domains::hints::models::HintRequestEntry;

/// Decides which prior request entry, if any, answers for a fetched post.
pub trait PostCachePolicy: Send + Sync {
    /// Key two posts must share to be considered the same content.
    fn cache_key(&self, text: &str) -> String;

    /// First prior entry whose post shares `text`'s key.
    fn find<'a>(
        &self,
        text: &str,
        prior: &'a [HintRequestEntry],
    ) -> Option<&'a HintRequestEntry> {
        let key = self.cache_key(text);
        prior.iter().find(|entry| self.cache_key(&entry.tweet) == key)
    }
}

/// Reuse only when the post text is byte-for-byte identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTextMatch;

impl PostCachePolicy for ExactTextMatch {
    fn cache_key(&self, text: &str) -> String {
        text.to_string()
    }

    fn find<'a>(
        &self,
        text: &str,
        prior: &'a [HintRequestEntry],
    ) -> Option<&'a HintRequestEntry> {
        prior.iter().find(|entry| entry.tweet == text)
    }
}

/// Reuse across case, punctuation and whitespace edits.
///
/// The key is the SHA-256 of the text lowercased, with every run of
/// non-alphanumeric characters turned into a single space. Punctuation
/// therefore separates words: "hint-please" keys like "hint please".
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedHashMatch;

impl PostCachePolicy for NormalizedHashMatch {
    fn cache_key(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let normalized = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
