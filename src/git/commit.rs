//! Commit and repository records.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::Commit;
use serde::{Deserialize, Serialize};

use super::SHORT_HASH_LEN;

/// A single commit as delivered by a commit source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit hash.
    pub hash: String,
    /// Author display name or account login, when known.
    pub author: Option<String>,
    /// Author date, or ingestion time when the source had none.
    pub date: DateTime<Utc>,
    /// Raw commit message, trimmed.
    pub message: String,
}

impl CommitInfo {
    /// Creates a record from a local `git2` commit.
    pub fn from_git_commit(commit: &Commit<'_>) -> Result<Self> {
        let hash = commit.id().to_string();

        let author = commit
            .author()
            .name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let timestamp = commit.author().when();
        let date = DateTime::from_timestamp(timestamp.seconds(), 0)
            .with_context(|| format!("Invalid timestamp on commit {hash}"))?;

        let message = String::from_utf8_lossy(commit.message_bytes())
            .trim()
            .to_string();

        Ok(Self {
            hash,
            author,
            date,
            message,
        })
    }

    /// Abbreviated hash for display.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(SHORT_HASH_LEN)
            .map_or(self.hash.len(), |(idx, _)| idx);
        &self.hash[..end]
    }

    /// First line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Repository metadata shown in the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Canonical `owner/name`.
    pub full_name: String,
    /// Repository description, if set.
    pub description: Option<String>,
    /// Canonical web URL.
    pub url: String,
    /// License display name, if one was detected.
    pub license_name: Option<String>,
    /// Default branch name.
    pub default_branch: String,
}
