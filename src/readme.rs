//! README document rendering.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::digest::{Category, Summaries};
use crate::git::{CommitInfo, RepositoryInfo};

pub mod insights;

/// Commits listed under the recent activity heading.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Renders a Markdown README from repository metadata, summaries and history.
#[derive(Debug, Clone)]
pub struct ReadmeGenerator {
    include_commit_examples: bool,
    generated_at: Option<DateTime<Utc>>,
}

impl Default for ReadmeGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReadmeGenerator {
    /// Creates a generator; `include_commit_examples` controls the example
    /// commit types in the contribution section.
    #[must_use]
    pub fn new(include_commit_examples: bool) -> Self {
        Self {
            include_commit_examples,
            generated_at: None,
        }
    }

    /// Pins the generated-on timestamp instead of using the current time.
    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Builds the complete document.
    #[must_use]
    pub fn render(
        &self,
        info: &RepositoryInfo,
        summaries: &Summaries,
        commits: &[CommitInfo],
    ) -> String {
        let section = |category: Category| {
            summaries
                .get(&category)
                .filter(|summary| !summary.is_empty())
                .map(|summary| summary.to_markdown())
        };
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);

        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}\n", info.full_name));
        if let Some(ref description) = info.description {
            lines.push(format!("{description}\n"));
        }
        lines.push(format!("**Repository:** [{0}]({0})\n", info.url));
        if let Some(ref license) = info.license_name {
            lines.push(format!("**License:** {license}\n"));
        }

        lines.push("---\n".to_string());
        lines.push(format!(
            "_This README was generated automatically from the repository's commit history on {}_\n",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        lines.push("## Introduction\n".to_string());
        lines.push(format!(
            "{}\n",
            insights::introduction(info.description.as_deref(), summaries)
        ));

        lines.push("## Features\n".to_string());
        match section(Category::Feature) {
            Some(features) => lines.push(format!("{features}\n")),
            None => lines.push(
                "No major features found in recent commit history. Please add feature descriptions manually.\n"
                    .to_string(),
            ),
        }

        let improvements: Vec<String> = [Category::Fix, Category::Performance, Category::Refactor]
            .into_iter()
            .filter_map(section)
            .collect();
        if !improvements.is_empty() {
            lines.push("## Fixes & Improvements\n".to_string());
            lines.push(format!("{}\n", improvements.join("\n\n")));
        }

        if let Some(docs) = section(Category::Docs) {
            lines.push("## Documentation\n".to_string());
            lines.push(format!("{docs}\n"));
        }

        lines.push("## Installation\n".to_string());
        lines.push("```bash".to_string());
        lines.push("# Example: replace with repository specific instructions".to_string());
        lines.push(format!("git clone {}", info.url));
        lines.push("```".to_string());
        lines.push(String::new());

        lines.push("## Project Analysis\n".to_string());
        lines.push(format!("{}\n", insights::project_analysis(summaries, commits)));

        lines.push("## Usage\n".to_string());
        match section(Category::Feature) {
            Some(features) => {
                lines.push("Based on recent development activity:\n".to_string());
                lines.push(format!("{features}\n"));
                lines.push(
                    "Please refer to the documentation for detailed usage instructions.\n"
                        .to_string(),
                );
            }
            None => lines.push(
                "Usage details are not clear from commit messages. Please add usage examples manually.\n"
                    .to_string(),
            ),
        }

        lines.push("## Contribution\n".to_string());
        lines.push(
            "Contributions are welcome. Prefer using Conventional Commits in commit messages.\n"
                .to_string(),
        );
        if self.include_commit_examples {
            lines.push("### Example commit types".to_string());
            lines.push("- `feat(scope): add meaningful feature`".to_string());
            lines.push("- `fix(scope): fix bug`".to_string());
            lines.push("- `docs: update documentation`".to_string());
            lines.push(String::new());
        }

        lines.push("## Recent activity (derived from commits)\n".to_string());
        lines.push(format!(
            "{}\n",
            insights::recent_activity(commits, RECENT_ACTIVITY_LIMIT)
        ));

        if let Some(ref license) = info.license_name {
            lines.push("## License\n".to_string());
            lines.push(format!("This project is licensed under the {license}.\n"));
        }

        lines.push("---\n".to_string());
        lines.push("_Generated by repo-digest_".to_string());

        let document = lines.join("\n");
        debug!(
            repository = %info.full_name,
            bytes = document.len(),
            "Rendered README"
        );
        document
    }
}
