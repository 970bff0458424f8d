//! Generate command: fetch, summarize, render and write a README.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use super::{SourceArgs, SummaryArgs};
use crate::digest::Summaries;
use crate::readme::ReadmeGenerator;
use crate::utils::Settings;

/// Generate command options.
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Commit source selection.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Summary options.
    #[command(flatten)]
    pub summary: SummaryArgs,

    /// Output file.
    #[arg(long, short = 'o', default_value = "README_GENERATED.md")]
    pub output: PathBuf,

    /// Omits the example commit types from the contribution section.
    #[arg(long)]
    pub no_commit_examples: bool,
}

impl GenerateCommand {
    /// Executes the generate command.
    pub async fn execute(self) -> Result<()> {
        let settings = Settings::load().context("Failed to load settings")?;
        let source = self.source.open(&settings)?;
        let name = source.describe();
        info!(source = %name, "Starting README generation");

        let repository = source.fetch_repository_info().await?;
        let commits = source
            .fetch_commits(self.source.max_commits(&settings))
            .await?;

        if commits.is_empty() {
            warn!(source = %name, "No commits found");
            println!("Warning: No commits found for repository {name}");
            return Ok(());
        }

        let summaries = self.summary.summarizer(&settings).summarize(&commits);
        if summaries.is_empty() {
            warn!(source = %name, "No commit summaries generated");
            println!("Warning: No commit summaries could be generated");
        }

        let document = ReadmeGenerator::new(!self.no_commit_examples).render(
            &repository,
            &summaries,
            &commits,
        );
        write_document(&self.output, &document)?;
        info!(path = %self.output.display(), "README generation completed");

        println!("README generated successfully: {}", self.output.display());
        println!("  Repository: {}", repository.full_name);
        println!("  Commits analyzed: {}", commits.len());
        println!("  Summary categories: {}", category_list(&summaries));
        Ok(())
    }
}

fn write_document(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, document)
        .with_context(|| format!("Failed to write README: {}", path.display()))
}

/// Comma-separated category keywords, or `none`.
pub(crate) fn category_list(summaries: &Summaries) -> String {
    if summaries.is_empty() {
        return "none".to_string();
    }
    summaries
        .keys()
        .map(|category| category.keyword())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::digest::{Category, Summary};
    use tempfile::TempDir;

    #[test]
    fn category_list_formats_keywords() {
        assert_eq!(category_list(&Summaries::new()), "none");

        let mut summaries = Summaries::new();
        summaries.insert(Category::Fix, Summary::Narrative("x".to_string()));
        summaries.insert(Category::Feature, Summary::Narrative("y".to_string()));
        assert_eq!(category_list(&summaries), "feat, fix");
    }

    #[test]
    fn write_document_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs").join("README.md");
        write_document(&path, "# hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "# hello");
    }
}
