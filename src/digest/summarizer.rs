//! Per-category summaries over a whole commit list.

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::classifier::{group_by_category, ParsedCommit};
use super::linguistics::{self, Linguistics, LinguisticsBackend};
use super::narrative::narrate;
use super::ranker;
use super::Category;
use crate::git::CommitInfo;

/// Bullets kept per category unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// How each category is summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Ranked list of verbatim commit fragments.
    Bullets,
    /// Themed prose paragraphs.
    #[default]
    Narrative,
}

/// Summary of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    /// Ranked fragments, best first.
    Bullets(Vec<String>),
    /// Composed prose.
    Narrative(String),
}

impl Summary {
    /// Returns true when there is nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bullets(items) => items.is_empty(),
            Self::Narrative(text) => text.trim().is_empty(),
        }
    }

    /// Renders the summary as Markdown: a `-` list for bullets, prose verbatim.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Bullets(items) => items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Narrative(text) => text.clone(),
        }
    }
}

/// Category to summary. Categories with nothing to report have no key.
pub type Summaries = BTreeMap<Category, Summary>;

/// Classifies commits and summarizes each category.
pub struct Summarizer {
    mode: SummaryMode,
    top_n: usize,
    linguistics: &'static dyn Linguistics,
}

impl Summarizer {
    /// Creates a summarizer with the shared backend for `backend`.
    #[must_use]
    pub fn new(mode: SummaryMode, backend: LinguisticsBackend) -> Self {
        Self::with_linguistics(mode, linguistics::select(backend))
    }

    /// Creates a summarizer over an explicit linguistics backend.
    #[must_use]
    pub fn with_linguistics(mode: SummaryMode, linguistics: &'static dyn Linguistics) -> Self {
        Self {
            mode,
            top_n: DEFAULT_TOP_N,
            linguistics,
        }
    }

    /// Sets how many bullets each category keeps.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Returns the configured mode.
    #[must_use]
    pub fn mode(&self) -> SummaryMode {
        self.mode
    }

    /// Summarizes every category present in `commits`.
    pub fn summarize(&self, commits: &[CommitInfo]) -> Summaries {
        let groups = group_by_category(commits);
        info!(
            commits = commits.len(),
            categories = groups.len(),
            mode = ?self.mode,
            backend = self.linguistics.name(),
            "Summarizing commit history"
        );

        groups
            .into_iter()
            .filter_map(|(category, group)| {
                let summary = match self.mode {
                    SummaryMode::Bullets => Summary::Bullets(self.summarize_bullets(&group)),
                    SummaryMode::Narrative => {
                        Summary::Narrative(self.summarize_narrative(category, &group))
                    }
                };
                debug!(%category, commits = group.len(), empty = summary.is_empty(), "Summarized category");
                (!summary.is_empty()).then_some((category, summary))
            })
            .collect()
    }

    /// Ranks descriptions and first body sentences, keeping the best `top_n`.
    #[must_use]
    pub fn summarize_bullets(&self, group: &[ParsedCommit]) -> Vec<String> {
        let mut candidates: Vec<&str> = Vec::new();
        for parsed in group {
            if !parsed.description.is_empty() {
                candidates.push(&parsed.description);
            }
            if let Some(first) = parsed
                .body
                .as_deref()
                .and_then(|body| self.linguistics.sentences(body).into_iter().next())
            {
                candidates.push(first);
            }
        }
        ranker::top(&candidates, self.top_n, self.linguistics)
    }

    /// Narrates a category from its non-empty descriptions.
    #[must_use]
    pub fn summarize_narrative(&self, category: Category, group: &[ParsedCommit]) -> String {
        let descriptions: Vec<&str> = group
            .iter()
            .map(|parsed| parsed.description.as_str())
            .filter(|description| !description.is_empty())
            .collect();
        narrate(category, &descriptions, self.linguistics)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::digest::classifier::classify;
    use chrono::Utc;

    fn commits(messages: &[&str]) -> Vec<CommitInfo> {
        messages
            .iter()
            .enumerate()
            .map(|(i, message)| CommitInfo {
                hash: format!("{i:040x}"),
                author: Some("dev".to_string()),
                date: Utc::now(),
                message: (*message).to_string(),
            })
            .collect()
    }

    fn naive(mode: SummaryMode) -> Summarizer {
        Summarizer::new(mode, LinguisticsBackend::Naive)
    }

    #[test]
    fn bullet_mode_includes_first_body_sentence() {
        let group = vec![classify(
            "feat(auth): add OAuth login\n\nSupports Google and GitHub providers.\nSecond line.",
        )];
        let bullets = naive(SummaryMode::Bullets).summarize_bullets(&group);
        assert_eq!(bullets.len(), 2);
        assert!(bullets.contains(&"add OAuth login".to_string()));
        assert!(bullets.contains(&"Supports Google and GitHub providers.".to_string()));
    }

    #[test]
    fn bullet_mode_truncates_to_top_n() {
        let group: Vec<ParsedCommit> = (0..9).map(|i| classify(&format!("fix: issue {i}"))).collect();
        let summarizer = naive(SummaryMode::Bullets).with_top_n(3);
        assert_eq!(summarizer.summarize_bullets(&group).len(), 3);
    }

    #[test]
    fn bullet_mode_empty_group_is_empty() {
        assert!(naive(SummaryMode::Bullets).summarize_bullets(&[]).is_empty());
    }

    #[test]
    fn absent_categories_have_no_entry() {
        let summaries = naive(SummaryMode::Narrative).summarize(&commits(&[
            "feat: add login page",
            "fix: crash on save",
        ]));
        assert_eq!(
            summaries.keys().copied().collect::<Vec<_>>(),
            vec![Category::Feature, Category::Fix]
        );
        assert!(!summaries.contains_key(&Category::Docs));
    }

    #[test]
    fn empty_history_summarizes_to_nothing() {
        assert!(naive(SummaryMode::Bullets).summarize(&[]).is_empty());
        assert!(naive(SummaryMode::Narrative).summarize(&[]).is_empty());
    }

    #[test]
    fn empty_messages_produce_no_entry() {
        let summaries = naive(SummaryMode::Narrative).summarize(&commits(&["", "   "]));
        assert!(summaries.is_empty());
    }

    #[test]
    fn narrative_mode_yields_prose() {
        let summaries =
            naive(SummaryMode::Narrative).summarize(&commits(&["test: cover parser", "test: cover lexer"]));
        assert_eq!(
            summaries.get(&Category::Test),
            Some(&Summary::Narrative(
                "Enhanced testing suite with 2 additions including new test cases, improved coverage, and testing infrastructure updates."
                    .to_string()
            ))
        );
    }

    #[test]
    fn markdown_rendering_by_variant() {
        let bullets = Summary::Bullets(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(bullets.to_markdown(), "- one\n- two");
        let prose = Summary::Narrative("Prose.".to_string());
        assert_eq!(prose.to_markdown(), "Prose.");
    }

    #[test]
    fn summaries_serialize_keyed_by_category_name() {
        let summaries =
            naive(SummaryMode::Bullets).summarize(&commits(&["docs: explain setup"]));
        let yaml = serde_yaml::to_string(&summaries).unwrap();
        assert_eq!(yaml, "docs:\n- explain setup\n");
    }
}
