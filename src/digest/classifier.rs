//! Commit message classification and grouping.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Category;
use crate::git::CommitInfo;

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static CONVENTIONAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<type>feat|fix|docs|style|refactor|perf|test|chore)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?:\s*(?P<desc>.+)",
    )
    .unwrap()
});

/// A commit message broken into its intent and parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Detected intent.
    pub category: Category,
    /// Parenthesized scope from a conventional prefix.
    pub scope: Option<String>,
    /// Whether the conventional prefix carried a `!` marker.
    pub breaking: bool,
    /// First-line summary, without the prefix when one was recognised.
    pub description: String,
    /// Remaining lines, trimmed.
    pub body: Option<String>,
}

/// Classifies a raw commit message.
///
/// Conventional prefixes (`type(scope)!: description`) are matched first. Anything
/// else goes through a keyword scan of the first line in
/// [`Category::FALLBACK_PRIORITY`] order and defaults to [`Category::Chore`].
#[must_use]
pub fn classify(message: &str) -> ParsedCommit {
    let mut lines = message.trim_start().lines();
    let first = lines.next().unwrap_or("");
    let rest: Vec<&str> = lines.collect();
    let body = Some(rest.join("\n").trim().to_string()).filter(|b| !b.is_empty());

    if let Some(captures) = CONVENTIONAL_PATTERN.captures(first) {
        let description = captures
            .name("desc")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        // "feat:   " with nothing after it falls through to the keyword scan
        if !description.is_empty() {
            let category = captures
                .name("type")
                .and_then(|m| Category::from_keyword(m.as_str()))
                .unwrap_or(Category::Chore);

            return ParsedCommit {
                category,
                scope: captures.name("scope").map(|m| m.as_str().to_string()),
                breaking: captures.name("breaking").is_some(),
                description,
                body,
            };
        }
    }

    ParsedCommit {
        category: guess_category(first),
        scope: None,
        breaking: false,
        description: first.trim().to_string(),
        body,
    }
}

/// Keyword scan used when a message has no conventional prefix.
fn guess_category(first_line: &str) -> Category {
    let lowered = first_line.to_lowercase();

    Category::FALLBACK_PRIORITY
        .into_iter()
        .find(|category| {
            let keyword = category.keyword();
            lowered.starts_with(keyword)
                || lowered.contains(&format!("{keyword}:"))
                || lowered.split_whitespace().any(|word| word == keyword)
        })
        .unwrap_or(Category::Chore)
}

/// Commits grouped by category, each group in original commit order.
pub type CategoryGroups = BTreeMap<Category, Vec<ParsedCommit>>;

/// Classifies every commit and groups the results by category.
///
/// Every input commit lands in exactly one group; categories with no commits have no key.
#[must_use]
pub fn group_by_category(commits: &[CommitInfo]) -> CategoryGroups {
    let mut groups = CategoryGroups::new();
    for commit in commits {
        let parsed = classify(&commit.message);
        groups.entry(parsed.category).or_default().push(parsed);
    }
    groups
}
