//! Commit source error handling.

use thiserror::Error;

/// Failures while fetching history or metadata from a commit source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The repository does not exist or is hidden from the caller.
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// Credentials were rejected or lack access.
    #[error("Access denied to {0}. Check the access token")]
    AccessDenied(String),

    /// The hosting API rate limit is exhausted.
    #[error("Rate limit exceeded. Provide a token or try again later")]
    RateLimitExceeded,

    /// The hosting API answered with an unexpected status.
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    /// The response body could not be decoded.
    #[error("Invalid response format from API: {0}")]
    InvalidResponseFormat(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A local repository could not be opened or read.
    #[error("Local repository error: {0}")]
    LocalRepository(String),
}
