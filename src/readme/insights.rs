//! Prose derived from which categories were active and from the raw history.

use std::collections::HashSet;

use crate::digest::{Category, Summaries};
use crate::git::CommitInfo;

/// Commits considered when judging development pace.
const PACE_WINDOW: usize = 30;

fn has(summaries: &Summaries, category: Category) -> bool {
    summaries
        .get(&category)
        .is_some_and(|summary| !summary.is_empty())
}

fn present(summaries: &Summaries, labels: &[(Category, &'static str)]) -> Vec<&'static str> {
    labels
        .iter()
        .filter(|(category, _)| has(summaries, *category))
        .map(|(_, label)| *label)
        .collect()
}

/// Opening paragraph: description, an activity sentence and a maturity sentence.
pub fn introduction(description: Option<&str>, summaries: &Summaries) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
        parts.push(description.to_string());
    }

    let activity = present(
        summaries,
        &[
            (Category::Feature, "active feature development"),
            (Category::Fix, "comprehensive bug fixing"),
            (Category::Refactor, "code quality improvements"),
            (Category::Docs, "documentation enhancements"),
            (Category::Test, "testing infrastructure development"),
            (Category::Performance, "performance optimizations"),
        ],
    );
    match activity.as_slice() {
        [] => {}
        [only] => parts.push(format!(
            "This project shows {only} with a focus on delivering robust and reliable software."
        )),
        [first, second] => parts.push(format!(
            "Recent development demonstrates {first} and {second}, indicating a well-maintained and actively evolving codebase."
        )),
        [init @ .., last] => parts.push(format!(
            "The project exhibits strong development momentum with {}, and {last}, showcasing a comprehensive approach to software development and maintenance.",
            init.join(", ")
        )),
    }

    let active = summaries.values().filter(|summary| !summary.is_empty()).count();
    if active >= 4 {
        parts.push(
            "The extensive commit history demonstrates a mature, well-maintained project with consistent development practices."
                .to_string(),
        );
    } else if active >= 2 {
        parts.push(
            "The project shows active development with regular updates and improvements."
                .to_string(),
        );
    }

    if parts.is_empty() {
        "No description available. Please update the repository description.".to_string()
    } else {
        parts.join(" ")
    }
}

/// Bulleted analysis of commit volume, focus, pace, contributors and quality.
pub fn project_analysis(summaries: &Summaries, commits: &[CommitInfo]) -> String {
    let mut insights = vec![format!(
        "**Development Activity**: Analysis of {} recent commits reveals:",
        commits.len()
    )];

    let focus = present(
        summaries,
        &[
            (Category::Feature, "feature development"),
            (Category::Fix, "stability improvements"),
            (Category::Refactor, "code quality enhancements"),
            (Category::Docs, "documentation improvements"),
            (Category::Test, "testing infrastructure"),
            (Category::Performance, "performance optimizations"),
        ],
    );
    if !focus.is_empty() {
        insights.push(format!("- Primary focus areas: {}", focus.join(", ")));
    }

    if !commits.is_empty() {
        let pace = match commits.len().min(PACE_WINDOW) {
            10.. => "High activity with frequent commits indicating active maintenance",
            5..=9 => "Moderate activity with regular updates",
            _ => "Steady development with periodic updates",
        };
        insights.push(format!("- **Development Pace**: {pace}"));
    }

    let authors: HashSet<&str> = commits
        .iter()
        .filter_map(|commit| commit.author.as_deref())
        .collect();
    match authors.len() {
        n if n > 10 => insights.push(format!(
            "- **Community**: Active community with {n}+ contributors"
        )),
        n if n > 3 => insights.push(format!(
            "- **Team**: Collaborative development with {n} active contributors"
        )),
        n if n > 1 => insights.push(format!(
            "- **Collaboration**: Small team development with {n} contributors"
        )),
        _ => {}
    }

    let quality = present(
        summaries,
        &[
            (Category::Test, "comprehensive testing"),
            (Category::Docs, "thorough documentation"),
            (Category::Refactor, "code quality focus"),
        ],
    );
    if !quality.is_empty() {
        insights.push(format!(
            "- **Quality Assurance**: Emphasis on {}",
            quality.join(", ")
        ));
    }

    insights.join("\n")
}

/// One line per commit: short hash, date, subject and author.
pub fn recent_activity(commits: &[CommitInfo], limit: usize) -> String {
    commits
        .iter()
        .take(limit)
        .map(|commit| {
            format!(
                "- `{}` {} - {} ({})",
                commit.short_hash(),
                commit.date.format("%Y-%m-%d"),
                commit.subject(),
                commit.author.as_deref().unwrap_or("unknown")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
