//! Commit sources: hosted repositories and local clones.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;

pub mod commit;
pub mod error;
pub mod github;
pub mod local;

pub use commit::{CommitInfo, RepositoryInfo};
pub use error::FetchError;
pub use github::GitHubClient;
pub use local::LocalRepository;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;

/// Commits fetched when the caller does not say otherwise.
pub const DEFAULT_MAX_COMMITS: usize = 500;

/// Trait for anything that can supply repository metadata and recent history.
pub trait CommitSource: Send + Sync {
    /// Human-readable identifier of the repository, for logs and messages.
    fn describe(&self) -> String;

    /// Fetches repository metadata.
    fn fetch_repository_info(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<RepositoryInfo>> + Send + '_>>;

    /// Fetches up to `max_commits` commits, most recent first.
    ///
    /// Records that cannot be decoded are skipped rather than failing the fetch.
    fn fetch_commits(
        &self,
        max_commits: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<CommitInfo>>> + Send + '_>>;
}
