//! # repo-digest
//!
//! Turns a repository's commit history into a README.
//!
//! ## Features
//!
//! - Conventional-commit classification with keyword fallback
//! - Ranked bullet or themed narrative summaries per category
//! - GitHub and local git history sources
//!
//! ## Quick Start
//!
//! ```rust
//! use repo_digest::digest::{Summarizer, SummaryMode, LinguisticsBackend};
//!
//! let summarizer = Summarizer::new(SummaryMode::Bullets, LinguisticsBackend::Naive);
//! assert!(summarizer.summarize(&[]).is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod digest;
pub mod git;
pub mod readme;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of repo-digest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
