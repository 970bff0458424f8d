//! Prose summaries built from theme clusters.

use super::frequency::TermFrequencies;
use super::linguistics::Linguistics;
use super::themes::{themes_for, ThemeClusterer};
use super::Category;

/// Key terms considered before trimming to the ones named in a fallback paragraph.
const KEY_TERM_POOL: usize = 10;

/// Key terms named in a fallback paragraph.
const FALLBACK_TERMS: usize = 5;

/// Phrasing for a category narrated through themes.
struct Template {
    /// Opening sentence; `{count}` and `{noun}` are substituted.
    opening: &'static str,
    singular: &'static str,
    plural: &'static str,
    /// Heading and lead-in of the paragraph used when no theme matched.
    fallback_heading: &'static str,
    fallback_lead: &'static str,
    closing: Option<&'static str>,
}

fn template_for(category: Category) -> Option<Template> {
    match category {
        Category::Feature => Some(Template {
            opening: "The project has seen significant feature development with {count} new {noun} implemented across multiple areas:",
            singular: "feature",
            plural: "features",
            fallback_heading: "Core Enhancements",
            fallback_lead: "Implemented improvements across",
            closing: None,
        }),
        Category::Fix => Some(Template {
            opening: "Comprehensive bug fixing effort with {count} {noun} resolved across multiple categories:",
            singular: "issue",
            plural: "issues",
            fallback_heading: "General Improvements",
            fallback_lead: "Fixed various issues touching",
            closing: Some("These fixes collectively enhance system stability, improve user experience, and ensure robust operation across different use cases and environments."),
        }),
        Category::Docs => Some(Template {
            opening: "Comprehensive documentation improvements with {count} {noun} enhancing project accessibility and developer experience:",
            singular: "update",
            plural: "updates",
            fallback_heading: "General Documentation",
            fallback_lead: "Improved project documentation covering",
            closing: Some("These documentation enhancements make the project more accessible to new users, provide better guidance for developers, and improve overall project maintainability."),
        }),
        Category::Refactor => Some(Template {
            opening: "Extensive codebase refactoring with {count} {noun} enhancing code quality and maintainability:",
            singular: "improvement",
            plural: "improvements",
            fallback_heading: "General Refactoring",
            fallback_lead: "Reorganized code around",
            closing: Some("These refactoring efforts result in cleaner, more maintainable code that is easier to understand, modify, and extend while improving overall system architecture."),
        }),
        Category::Style | Category::Performance | Category::Test | Category::Chore => None,
    }
}

/// One-line summary for categories without a theme template.
fn terse_sentence(category: Category, count: usize) -> String {
    match category {
        Category::Test => format!(
            "Enhanced testing suite with {count} additions including new test cases, improved coverage, and testing infrastructure updates."
        ),
        Category::Performance => format!(
            "Optimized performance with {count} improvements targeting speed, efficiency, and resource utilization."
        ),
        other => format!(
            "Made {count} {} changes improving various aspects of the project.",
            other.name()
        ),
    }
}

/// Writes a prose summary of a category's descriptions.
///
/// Templated categories get an opening sentence, one bullet per matched theme with
/// its match count, and a closing sentence where the template has one. When no theme
/// matches, a single paragraph names the category's most frequent terms instead.
/// Other categories get one count-based sentence. No descriptions means an empty
/// string.
#[must_use]
pub fn narrate<S: AsRef<str>>(
    category: Category,
    descriptions: &[S],
    linguistics: &dyn Linguistics,
) -> String {
    let count = descriptions.len();
    if count == 0 {
        return String::new();
    }

    let (Some(template), Some(table)) = (template_for(category), themes_for(category)) else {
        return terse_sentence(category, count);
    };

    let noun = if count == 1 {
        template.singular
    } else {
        template.plural
    };
    let mut narrative = template
        .opening
        .replace("{count}", &count.to_string())
        .replace("{noun}", noun);

    let clusters = ThemeClusterer::new(table).cluster(descriptions);
    for cluster in &clusters {
        narrative.push_str(&format!(
            "\n• **{}**: {}",
            cluster.theme.name,
            cluster.theme.describe(cluster.len())
        ));
    }

    if clusters.is_empty() {
        let frequencies = TermFrequencies::build(descriptions, linguistics);
        let terms = frequencies.key_terms(KEY_TERM_POOL);
        let areas = if terms.is_empty() {
            "core functionality, system capabilities".to_string()
        } else {
            terms
                .into_iter()
                .take(FALLBACK_TERMS)
                .collect::<Vec<_>>()
                .join(", ")
        };
        narrative.push_str(&format!(
            "\n• **{}**: {} {areas}.",
            template.fallback_heading, template.fallback_lead
        ));
    }

    if let Some(closing) = template.closing {
        narrative.push_str("\n\n");
        narrative.push_str(closing);
    }

    narrative
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::digest::linguistics::NaiveLinguistics;

    #[test]
    fn fix_narrative_reports_critical_stability_count() {
        let mut descriptions = Vec::new();
        for i in 0..8 {
            descriptions.push(format!("resolve crash in worker {i}"));
        }
        for i in 0..4 {
            descriptions.push(format!("plug memory leak in pool {i}"));
        }

        let narrative = narrate(Category::Fix, &descriptions, &NaiveLinguistics);

        assert!(narrative.starts_with("Comprehensive bug fixing effort with 12 issues resolved"));
        assert!(narrative.contains("• **Critical Stability**: Resolved 8 critical issues"));
        assert!(narrative.contains("• **Memory & Performance**: Fixed 4 performance-related issues"));
        assert!(narrative.ends_with("across different use cases and environments."));
    }

    #[test]
    fn feature_narrative_lists_themes_in_table_order() {
        let descriptions = ["add user signup", "add REST endpoint", "add login page"];
        let narrative = narrate(Category::Feature, &descriptions, &NaiveLinguistics);

        let auth = narrative.find("Authentication & Security").unwrap();
        let api = narrative.find("API & Backend Services").unwrap();
        assert!(auth < api);
        assert!(narrative.contains("with 3 new features implemented"));
        assert!(narrative.contains("Enhanced authentication system with 2 improvements"));
    }

    #[test]
    fn singular_noun_for_single_commit() {
        let narrative = narrate(Category::Docs, &["update README"], &NaiveLinguistics);
        assert!(narrative.contains("with 1 update enhancing"));
        assert!(narrative.contains("**User Documentation**"));
    }

    #[test]
    fn unmatched_descriptions_name_key_terms() {
        let descriptions = ["rework scheduler", "tune scheduler", "scheduler retries"];
        let narrative = narrate(Category::Feature, &descriptions, &NaiveLinguistics);
        assert!(narrative
            .contains("• **Core Enhancements**: Implemented improvements across scheduler."));
    }

    #[test]
    fn fallback_without_key_terms_uses_generic_areas() {
        let narrative = narrate(Category::Feature, &["misc"], &NaiveLinguistics);
        assert!(narrative.contains("core functionality, system capabilities"));
    }

    #[test]
    fn terse_categories_use_one_sentence() {
        assert_eq!(
            narrate(Category::Test, &["a", "b"], &NaiveLinguistics),
            "Enhanced testing suite with 2 additions including new test cases, improved coverage, and testing infrastructure updates."
        );
        assert_eq!(
            narrate(Category::Chore, &["bump deps"], &NaiveLinguistics),
            "Made 1 chore changes improving various aspects of the project."
        );
    }

    #[test]
    fn no_descriptions_is_empty() {
        assert_eq!(narrate::<&str>(Category::Fix, &[], &NaiveLinguistics), "");
    }
}
