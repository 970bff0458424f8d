//! Arguments shared between commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::digest::{LinguisticsBackend, Summarizer, SummaryMode, DEFAULT_TOP_N};
use crate::git::github::DEFAULT_API_URL;
use crate::git::{CommitSource, GitHubClient, LocalRepository, DEFAULT_MAX_COMMITS};
use crate::utils::Settings;

/// Environment variable overriding the hosting API base URL.
pub const API_URL_ENV_VAR: &str = "GITHUB_API_URL";

/// Where commit history comes from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Repository owner or organization.
    #[arg(
        long,
        short = 'u',
        visible_alias = "user",
        required_unless_present = "local",
        conflicts_with = "local"
    )]
    pub owner: Option<String>,

    /// Repository name.
    #[arg(long, short = 'r', required_unless_present = "local", conflicts_with = "local")]
    pub repo: Option<String>,

    /// Reads history from a local git repository instead of the hosting API.
    #[arg(long, value_name = "PATH")]
    pub local: Option<PathBuf>,

    /// Access token (falls back to GITHUB_TOKEN, GH_TOKEN, then settings).
    #[arg(long, short = 't')]
    pub token: Option<String>,

    /// Hosting API base URL [default: https://api.github.com].
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Maximum number of commits to fetch [default: 500].
    #[arg(long)]
    pub max_commits: Option<usize>,
}

impl SourceArgs {
    /// Commit limit: flag, then settings, then the built-in default.
    pub fn max_commits(&self, settings: &Settings) -> usize {
        self.max_commits
            .or(settings.defaults.max_commits)
            .unwrap_or(DEFAULT_MAX_COMMITS)
    }

    /// API base URL: flag, then environment (or the settings `env` table),
    /// then settings defaults, then the built-in default.
    pub fn api_url(&self, settings: &Settings) -> String {
        self.api_url
            .clone()
            .or_else(|| settings.get_env_var(API_URL_ENV_VAR))
            .or_else(|| settings.defaults.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Opens the selected commit source.
    pub fn open(&self, settings: &Settings) -> Result<Box<dyn CommitSource>> {
        if let Some(ref path) = self.local {
            debug!(path = %path.display(), "Using local repository source");
            return Ok(Box::new(LocalRepository::open(path)?));
        }

        let (Some(owner), Some(repo)) = (self.owner.as_deref(), self.repo.as_deref()) else {
            anyhow::bail!("Either --local or both --owner and --repo must be given");
        };
        let token = settings.resolve_token(self.token.clone());
        let client = GitHubClient::with_base_url(&self.api_url(settings), owner, repo, token)?;
        Ok(Box::new(client))
    }
}

/// How history is summarized.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Summary style [default: narrative].
    #[arg(long, value_enum)]
    pub mode: Option<SummaryMode>,

    /// Bullets kept per category in bullets mode [default: 5].
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Tokenization and stop-word backend.
    #[arg(long, value_enum, default_value_t = LinguisticsBackend::English)]
    pub tokenizer: LinguisticsBackend,
}

impl SummaryArgs {
    /// Builds a summarizer from flags, settings defaults and built-in defaults.
    pub fn summarizer(&self, settings: &Settings) -> Summarizer {
        let mode = self.mode.or(settings.defaults.mode).unwrap_or_default();
        let top_n = self
            .top_n
            .or(settings.defaults.top_n)
            .unwrap_or(DEFAULT_TOP_N);
        Summarizer::new(mode, self.tokenizer).with_top_n(top_n)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::utils::Defaults;

    fn source(max_commits: Option<usize>, api_url: Option<&str>) -> SourceArgs {
        SourceArgs {
            owner: Some("octo".to_string()),
            repo: Some("demo".to_string()),
            local: None,
            token: None,
            api_url: api_url.map(str::to_string),
            max_commits,
        }
    }

    fn settings_with(defaults: Defaults) -> Settings {
        Settings {
            defaults,
            ..Settings::default()
        }
    }

    #[test]
    fn max_commits_precedence() {
        let settings = settings_with(Defaults {
            max_commits: Some(40),
            ..Defaults::default()
        });
        assert_eq!(source(Some(7), None).max_commits(&settings), 7);
        assert_eq!(source(None, None).max_commits(&settings), 40);
        assert_eq!(
            source(None, None).max_commits(&Settings::default()),
            DEFAULT_MAX_COMMITS
        );
    }

    #[test]
    fn explicit_api_url_wins() {
        let settings = settings_with(Defaults {
            api_url: Some("https://ghe.example.com/api/v3".to_string()),
            ..Defaults::default()
        });
        assert_eq!(
            source(None, Some("http://localhost:9999")).api_url(&settings),
            "http://localhost:9999"
        );
    }

    #[test]
    fn api_url_from_settings_env_table_precedes_defaults() {
        if std::env::var(API_URL_ENV_VAR).is_ok() {
            return;
        }
        let mut settings = settings_with(Defaults {
            api_url: Some("https://defaults.example.com".to_string()),
            ..Defaults::default()
        });
        assert_eq!(
            source(None, None).api_url(&settings),
            "https://defaults.example.com"
        );

        settings.env.insert(
            API_URL_ENV_VAR.to_string(),
            "https://ghe.example.com/api/v3".to_string(),
        );
        assert_eq!(
            source(None, None).api_url(&settings),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(
            source(None, None).api_url(&Settings::default()),
            DEFAULT_API_URL
        );
    }

    #[test]
    fn summarizer_uses_settings_defaults() {
        let settings = settings_with(Defaults {
            mode: Some(SummaryMode::Bullets),
            top_n: Some(2),
            ..Defaults::default()
        });
        let args = SummaryArgs {
            mode: None,
            top_n: None,
            tokenizer: LinguisticsBackend::Naive,
        };
        assert_eq!(args.summarizer(&settings).mode(), SummaryMode::Bullets);

        let args = SummaryArgs {
            mode: Some(SummaryMode::Narrative),
            top_n: None,
            tokenizer: LinguisticsBackend::Naive,
        };
        assert_eq!(args.summarizer(&settings).mode(), SummaryMode::Narrative);
    }
}
