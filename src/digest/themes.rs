//! Keyword-driven thematic clustering.
//!
//! A theme is a named keyword set. A description joins every theme that has at
//! least one keyword starting a word in it, so one description may land in
//! several themes or in none.

use super::Category;

/// A named cluster and the keywords that pull descriptions into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Display name.
    pub name: &'static str,
    /// Lower-case keywords, matched at word starts.
    pub keywords: &'static [&'static str],
    /// Narrative clause, with `{count}` standing for the number of matches.
    pub clause: &'static str,
}

impl Theme {
    /// Returns true when any keyword begins a word of the description, ignoring case.
    #[must_use]
    pub fn matches(&self, description: &str) -> bool {
        let lowered = description.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| contains_at_word_start(&lowered, keyword))
    }

    /// Renders the narrative clause for a match count.
    #[must_use]
    pub fn describe(&self, count: usize) -> String {
        self.clause.replace("{count}", &count.to_string())
    }
}

fn contains_at_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Themes for feature work, also the default table.
pub const FEATURE_THEMES: &[Theme] = &[
    Theme {
        name: "Authentication & Security",
        keywords: &["auth", "oauth", "login", "signup", "sign up", "user", "security", "token", "permission", "password"],
        clause: "Enhanced authentication system with {count} improvements including user management, security protocols, and access control mechanisms.",
    },
    Theme {
        name: "API & Backend Services",
        keywords: &["api", "endpoint", "request", "response", "server", "backend", "service", "route"],
        clause: "Expanded API capabilities with {count} new endpoints and backend services, improving data handling and service integration.",
    },
    Theme {
        name: "User Interface & Experience",
        keywords: &["ui", "interface", "component", "view", "frontend", "react", "vue", "angular", "css", "html", "page"],
        clause: "Introduced {count} new UI components and interface improvements, enhancing user experience and visual design.",
    },
    Theme {
        name: "Performance & Optimization",
        keywords: &["cache", "caching", "performance", "optimiz", "speed", "memory", "efficient", "fast"],
        clause: "Implemented {count} performance enhancements including caching mechanisms, memory optimization, and speed improvements.",
    },
    Theme {
        name: "Data Management",
        keywords: &["database", "db", "sql", "query", "data", "model", "schema", "migration"],
        clause: "Enhanced data handling with {count} database improvements, query optimizations, and data model enhancements.",
    },
    Theme {
        name: "Platform Integration",
        keywords: &["support", "compatib", "integration", "integrate", "plugin", "extension", "platform"],
        clause: "Added {count} new integrations and platform compatibility features, expanding ecosystem support.",
    },
    Theme {
        name: "Testing & Quality Assurance",
        keywords: &["test", "coverage", "quality", "validation", "check"],
        clause: "Strengthened testing framework with {count} new testing capabilities and quality assurance measures.",
    },
];

/// Themes for bug fixes.
pub const FIX_THEMES: &[Theme] = &[
    Theme {
        name: "Critical Stability",
        keywords: &["crash", "error", "exception", "fail", "critical", "fatal", "hang", "panic"],
        clause: "Resolved {count} critical issues including application crashes, fatal errors, and system stability problems that could impact user experience.",
    },
    Theme {
        name: "Memory & Performance",
        keywords: &["memory", "leak", "performance", "slow", "timeout", "optimiz"],
        clause: "Fixed {count} performance-related issues including memory leaks, slow operations, and resource optimization problems.",
    },
    Theme {
        name: "User Interface",
        keywords: &["ui", "display", "render", "visual", "layout", "css", "style", "appearance"],
        clause: "Corrected {count} user interface issues including display problems, rendering bugs, and visual inconsistencies.",
    },
    Theme {
        name: "Security",
        keywords: &["security", "vulnerab", "exploit", "xss", "csrf", "injection", "auth"],
        clause: "Addressed {count} security vulnerabilities and authentication issues, strengthening system protection.",
    },
    Theme {
        name: "Data & Logic",
        keywords: &["data", "database", "query", "logic", "calculation", "validation", "pars"],
        clause: "Resolved {count} data handling and business logic issues, improving accuracy and reliability.",
    },
    Theme {
        name: "API & Integration",
        keywords: &["api", "endpoint", "integration", "connection", "network", "request", "response"],
        clause: "Fixed {count} API and integration problems, ensuring reliable external service communication.",
    },
    Theme {
        name: "Compatibility",
        keywords: &["compatib", "platform", "browser", "version", "support", "deprecat"],
        clause: "Improved {count} compatibility issues across different platforms, browsers, and system versions.",
    },
];

/// Themes for documentation changes.
pub const DOCS_THEMES: &[Theme] = &[
    Theme {
        name: "User Documentation",
        keywords: &["readme", "guide", "tutorial", "getting started", "quickstart", "example"],
        clause: "Enhanced user-facing documentation with {count} updates including guides, tutorials, examples, and getting started materials.",
    },
    Theme {
        name: "API Reference",
        keywords: &["api", "reference", "docstring", "endpoint", "parameter", "method"],
        clause: "Improved API documentation with {count} updates covering endpoints, parameters, methods, and technical references.",
    },
    Theme {
        name: "Code Documentation",
        keywords: &["comment", "docstring", "doc comment", "inline", "code", "function", "class"],
        clause: "Strengthened code documentation with {count} improvements to inline comments, docstrings, and code explanations.",
    },
    Theme {
        name: "Installation & Setup",
        keywords: &["install", "setup", "configur", "deploy", "build"],
        clause: "Updated installation and setup documentation with {count} improvements covering configuration, deployment, and build processes.",
    },
    Theme {
        name: "Support Documentation",
        keywords: &["troubleshoot", "faq", "problem", "issue", "help", "support"],
        clause: "Enhanced support materials with {count} additions to troubleshooting guides, FAQs, and help resources.",
    },
];

/// Themes for refactoring work.
pub const REFACTOR_THEMES: &[Theme] = &[
    Theme {
        name: "Code Architecture",
        keywords: &["structure", "restructur", "architecture", "organiz", "reorganiz", "modular", "component", "class"],
        clause: "Restructured codebase architecture with {count} improvements focusing on modularity, component organization, and structural clarity.",
    },
    Theme {
        name: "Performance Optimization",
        keywords: &["performance", "optimiz", "efficien", "speed", "memory", "cache"],
        clause: "Optimized code performance through {count} refactoring efforts targeting efficiency, speed improvements, and resource utilization.",
    },
    Theme {
        name: "Code Quality",
        keywords: &["clean", "simplif", "readab", "maintainab", "quality", "standard", "lint"],
        clause: "Enhanced code quality with {count} refactoring improvements focusing on readability, maintainability, and coding standards.",
    },
    Theme {
        name: "API Design",
        keywords: &["api", "interface", "method", "function", "signature", "endpoint", "trait"],
        clause: "Refined API design through {count} interface improvements, method restructuring, and endpoint optimization.",
    },
    Theme {
        name: "Dependency Management",
        keywords: &["dependenc", "import", "package", "module", "library", "crate", "external"],
        clause: "Improved dependency management with {count} refactoring changes to imports, packages, and external library usage.",
    },
];

/// Returns the theme table a category is narrated with, if it has one.
#[must_use]
pub fn themes_for(category: Category) -> Option<&'static [Theme]> {
    match category {
        Category::Feature => Some(FEATURE_THEMES),
        Category::Fix => Some(FIX_THEMES),
        Category::Docs => Some(DOCS_THEMES),
        Category::Refactor => Some(REFACTOR_THEMES),
        Category::Style | Category::Performance | Category::Test | Category::Chore => None,
    }
}

/// Descriptions that matched one theme, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCluster<'a> {
    /// The matched theme.
    pub theme: &'static Theme,
    /// Member descriptions.
    pub descriptions: Vec<&'a str>,
}

impl ThemeCluster<'_> {
    /// Number of member descriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// Returns true when the cluster has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

/// Assigns descriptions to themes from a fixed table.
#[derive(Debug, Clone, Copy)]
pub struct ThemeClusterer {
    table: &'static [Theme],
}

impl ThemeClusterer {
    /// Creates a clusterer over a theme table.
    #[must_use]
    pub fn new(table: &'static [Theme]) -> Self {
        Self { table }
    }

    /// Groups descriptions by theme.
    ///
    /// Output follows the table's declaration order and contains only themes with at
    /// least one member.
    #[must_use]
    pub fn cluster<'a, S: AsRef<str>>(&self, descriptions: &'a [S]) -> Vec<ThemeCluster<'a>> {
        self.table
            .iter()
            .map(|theme| ThemeCluster {
                theme,
                descriptions: descriptions
                    .iter()
                    .map(|d| d.as_ref())
                    .filter(|d| theme.matches(d))
                    .collect(),
            })
            .filter(|cluster| !cluster.is_empty())
            .collect()
    }
}

impl Default for ThemeClusterer {
    fn default() -> Self {
        Self::new(FEATURE_THEMES)
    }
}
