//! Commit classification and summarization pipeline.
//!
//! Raw commit messages are classified by intent, grouped per category and turned
//! into either ranked bullet lists or themed prose:
//!
//! ```
//! use repo_digest::digest::{classify, Category};
//!
//! let parsed = classify("feat(auth): add OAuth login");
//! assert_eq!(parsed.category, Category::Feature);
//! assert_eq!(parsed.scope.as_deref(), Some("auth"));
//! ```

pub mod category;
pub mod classifier;
pub mod frequency;
pub mod linguistics;
pub mod narrative;
pub mod ranker;
pub mod summarizer;
pub mod themes;

pub use category::Category;
pub use classifier::{classify, group_by_category, CategoryGroups, ParsedCommit};
pub use frequency::TermFrequencies;
pub use linguistics::{Linguistics, LinguisticsBackend};
pub use ranker::rank;
pub use summarizer::{Summaries, Summarizer, Summary, SummaryMode, DEFAULT_TOP_N};
pub use themes::{Theme, ThemeCluster, ThemeClusterer};
