//! Commit intent categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Intent of a commit, derived from its message.
///
/// The set is closed. Messages that match nothing resolve to [`Category::Chore`],
/// which doubles as the catch-all bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New functionality.
    Feature,
    /// Bug fix.
    Fix,
    /// Documentation changes.
    Docs,
    /// Formatting and other non-functional style changes.
    Style,
    /// Code restructuring without behaviour change.
    Refactor,
    /// Performance improvements.
    Performance,
    /// Test additions and changes.
    Test,
    /// Maintenance and everything unclassified.
    Chore,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Feature,
        Category::Fix,
        Category::Docs,
        Category::Style,
        Category::Refactor,
        Category::Performance,
        Category::Test,
        Category::Chore,
    ];

    /// Order in which keywords are searched when a message has no conventional prefix.
    pub const FALLBACK_PRIORITY: [Category; 7] = [
        Category::Feature,
        Category::Fix,
        Category::Docs,
        Category::Refactor,
        Category::Performance,
        Category::Test,
        Category::Style,
    ];

    /// Returns the conventional-commit keyword for this category.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Feature => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Performance => "perf",
            Self::Test => "test",
            Self::Chore => "chore",
        }
    }

    /// Returns the lower-case category name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Performance => "performance",
            Self::Test => "test",
            Self::Chore => "chore",
        }
    }

    /// Looks up a category by its conventional-commit keyword, ignoring case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert_eq!(Category::from_keyword("FEAT"), Some(Category::Feature));
        assert_eq!(Category::from_keyword("Perf"), Some(Category::Performance));
        assert_eq!(Category::from_keyword("build"), None);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let yaml = serde_yaml::to_string(&Category::Performance).unwrap();
        assert_eq!(yaml.trim(), "performance");
    }

    #[test]
    fn ordering_follows_declaration() {
        let mut shuffled = vec![Category::Chore, Category::Feature, Category::Test];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Category::Feature, Category::Test, Category::Chore]
        );
    }
}
