use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;
use thiserror::Error;

use crate::gateway::RepoRecord;

/// Languages offered by the navigation bar, `All` first
pub const DEFAULT_LANGUAGES: [&str; 6] = ["All", "JavaScript", "Ruby", "Java", "CSS", "Python"];

const ALL_CATEGORIES: &str = "All";
const MAX_CATEGORY_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language '{language}': {reason}")]
pub struct InvalidCategory {
    pub language: String,
    pub reason: &'static str,
}

/// Partition key for popular repositories: a language name or `All`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Any spelling of `all` becomes the one sentinel key
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::all()
        } else {
            Self(key)
        }
    }

    /// Checks a caller-supplied language name before it becomes a cache key.
    ///
    /// Accepts 1 to 50 characters of ASCII letters, digits, spaces and
    /// `+ # - . _`, enough for names like `C++`, `C#` or `Visual Basic .NET`.
    pub fn parse(raw: &str) -> Result<Self, InvalidCategory> {
        let trimmed = raw.trim();
        let invalid = |reason| InvalidCategory {
            language: trimmed.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if trimmed.len() > MAX_CATEGORY_LEN {
            return Err(invalid("too long"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '+' | '#' | '-' | '.' | '_'))
        {
            return Err(invalid("contains unsupported characters"));
        }

        Ok(Self::new(trimmed))
    }

    /// Sentinel key covering every language
    pub fn all() -> Self {
        Self(ALL_CATEGORIES.to_string())
    }

    pub fn is_all(&self) -> bool {
        self.0.eq_ignore_ascii_case(ALL_CATEGORIES)
    }

    pub fn defaults() -> Vec<CategoryKey> {
        DEFAULT_LANGUAGES.iter().map(|l| CategoryKey::new(*l)).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CacheStatus {
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

/// Snapshot of one category in the cache.
///
/// `items` is present only when loaded and `error` only when failed; the
/// constructors are the only way to build an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    key: CategoryKey,
    status: CacheStatus,
    items: Option<Vec<RepoRecord>>,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn not_requested(key: CategoryKey) -> Self {
        Self {
            key,
            status: CacheStatus::NotRequested,
            items: None,
            error: None,
            updated_at: None,
        }
    }

    pub fn loading(key: CategoryKey) -> Self {
        Self {
            key,
            status: CacheStatus::Loading,
            items: None,
            error: None,
            updated_at: Some(Utc::now()),
        }
    }

    pub fn loaded(key: CategoryKey, items: Vec<RepoRecord>) -> Self {
        Self {
            key,
            status: CacheStatus::Loaded,
            items: Some(items),
            error: None,
            updated_at: Some(Utc::now()),
        }
    }

    pub fn failed(key: CategoryKey, error: impl Into<String>) -> Self {
        Self {
            key,
            status: CacheStatus::Failed,
            items: None,
            error: Some(error.into()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn key(&self) -> &CategoryKey {
        &self.key
    }

    pub fn status(&self) -> CacheStatus {
        self.status
    }

    pub fn items(&self) -> Option<&[RepoRecord]> {
        self.items.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Time of the last status change; unset for keys never requested
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Whether a display should show a spinner for this entry.
    /// Never-requested keys count as pending, same as loading ones.
    pub fn is_pending(&self) -> bool {
        matches!(
            self.status,
            CacheStatus::NotRequested | CacheStatus::Loading
        )
    }
}
