//! CLI interface for repo-digest.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod generate;
pub mod options;
pub mod summarize;

pub use generate::GenerateCommand;
pub use options::{SourceArgs, SummaryArgs};
pub use summarize::{OutputFormat, SummarizeCommand};

/// repo-digest: README generation from commit history.
#[derive(Parser)]
#[command(name = "repo-digest")]
#[command(
    about = "Generates a README from a repository's commit history",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetches history, summarizes it and writes a README.
    Generate(GenerateCommand),
    /// Prints the per-category summaries without rendering a document.
    Summarize(SummarizeCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute().await,
            Commands::Summarize(cmd) => cmd.execute().await,
        }
    }
}
