//! Summarize command: print per-category summaries.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;

use super::{SourceArgs, SummaryArgs};
use crate::digest::Summaries;
use crate::utils::Settings;

/// Serialization format for printed summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML mapping.
    #[default]
    Yaml,
    /// Pretty-printed JSON object.
    Json,
}

impl OutputFormat {
    /// Serializes `summaries` in this format.
    pub fn render(self, summaries: &Summaries) -> Result<String> {
        match self {
            Self::Yaml => {
                serde_yaml::to_string(summaries).context("Failed to serialize summaries to YAML")
            }
            Self::Json => serde_json::to_string_pretty(summaries)
                .map(|json| json + "\n")
                .context("Failed to serialize summaries to JSON"),
        }
    }
}

/// Summarize command options.
#[derive(Parser, Debug)]
pub struct SummarizeCommand {
    /// Commit source selection.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Summary options.
    #[command(flatten)]
    pub summary: SummaryArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl SummarizeCommand {
    /// Executes the summarize command.
    pub async fn execute(self) -> Result<()> {
        let settings = Settings::load().context("Failed to load settings")?;
        let source = self.source.open(&settings)?;

        let commits = source
            .fetch_commits(self.source.max_commits(&settings))
            .await?;
        if commits.is_empty() {
            warn!(source = %source.describe(), "No commits found");
        }

        let summaries = self.summary.summarizer(&settings).summarize(&commits);
        print!("{}", self.format.render(&summaries)?);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::digest::{Category, Summary};

    #[test]
    fn renders_json_with_category_keys() {
        let mut summaries = Summaries::new();
        summaries.insert(
            Category::Feature,
            Summary::Bullets(vec!["add login".to_string()]),
        );
        let json = OutputFormat::Json.render(&summaries).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["feature"][0], "add login");
    }

    #[test]
    fn renders_empty_yaml_mapping() {
        let yaml = OutputFormat::Yaml.render(&Summaries::new()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
