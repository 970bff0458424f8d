//! Corpus term frequencies.

use std::collections::HashMap;

use super::linguistics::{content_terms, Linguistics};

/// Minimum length for a term to count as a key term.
const KEY_TERM_MIN_LEN: usize = 3;

/// Normalized term counts over one corpus.
///
/// Terms are lower-cased, stripped of non-alphanumeric characters and filtered
/// through the backend's stop-word list before counting.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    counts: HashMap<String, usize>,
    /// Terms in order of first appearance, for deterministic tie-breaking.
    order: Vec<String>,
}

impl TermFrequencies {
    /// Counts terms across every string in the corpus.
    pub fn build<S: AsRef<str>>(corpus: &[S], linguistics: &dyn Linguistics) -> Self {
        let mut frequencies = Self::default();
        for text in corpus {
            for term in content_terms(linguistics, text.as_ref()) {
                frequencies.add(term);
            }
        }
        frequencies
    }

    fn add(&mut self, term: String) {
        match self.counts.get_mut(&term) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(term.clone(), 1);
                self.order.push(term);
            }
        }
    }

    /// Returns the count for a normalized term, zero when unseen.
    #[must_use]
    pub fn get(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true when no terms were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sums the frequencies of a text's terms.
    #[must_use]
    pub fn score(&self, text: &str, linguistics: &dyn Linguistics) -> usize {
        content_terms(linguistics, text)
            .iter()
            .map(|term| self.get(term))
            .sum()
    }

    /// Terms by descending count, first appearance breaking ties.
    #[must_use]
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|term| (term.as_str(), self.counts[term]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Recurring, meaningful terms: longer than two characters, not purely numeric,
    /// seen more than once. At most `limit` are returned.
    #[must_use]
    pub fn key_terms(&self, limit: usize) -> Vec<&str> {
        self.most_common()
            .into_iter()
            .filter(|(term, _)| {
                term.chars().count() >= KEY_TERM_MIN_LEN && !term.chars().all(char::is_numeric)
            })
            .take(limit)
            .filter(|(_, count)| *count > 1)
            .map(|(term, _)| term)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::digest::linguistics::NaiveLinguistics;

    #[test]
    fn counts_across_corpus_case_insensitively() {
        let freq = TermFrequencies::build(&["add login", "add signup", "ADD LOGIN"], &NaiveLinguistics);
        assert_eq!(freq.get("add"), 3);
        assert_eq!(freq.get("login"), 2);
        assert_eq!(freq.get("signup"), 1);
        assert_eq!(freq.get("missing"), 0);
        assert_eq!(freq.len(), 3);
    }

    #[test]
    fn stop_words_are_not_counted() {
        let freq = TermFrequencies::build(&["fix the crash in the parser"], &NaiveLinguistics);
        assert_eq!(freq.get("the"), 0);
        assert_eq!(freq.get("in"), 0);
        assert_eq!(freq.get("crash"), 1);
    }

    #[test]
    fn empty_corpus_is_empty() {
        let freq = TermFrequencies::build::<&str>(&[], &NaiveLinguistics);
        assert!(freq.is_empty());
        assert!(freq.most_common().is_empty());
    }

    #[test]
    fn score_sums_term_counts() {
        let freq = TermFrequencies::build(&["add login", "add signup", "ADD LOGIN"], &NaiveLinguistics);
        assert_eq!(freq.score("add login", &NaiveLinguistics), 5);
        assert_eq!(freq.score("add signup", &NaiveLinguistics), 4);
        assert_eq!(freq.score("unrelated words", &NaiveLinguistics), 0);
    }

    #[test]
    fn most_common_breaks_ties_by_first_appearance() {
        let freq = TermFrequencies::build(&["beta alpha", "alpha beta gamma"], &NaiveLinguistics);
        let ranked = freq.most_common();
        assert_eq!(ranked, vec![("beta", 2), ("alpha", 2), ("gamma", 1)]);
    }

    #[test]
    fn key_terms_require_repetition_and_length() {
        let freq = TermFrequencies::build(
            &["cache api 42", "cache api 42", "cache parser"],
            &NaiveLinguistics,
        );
        assert_eq!(freq.key_terms(10), vec!["cache", "api"]);
    }
}
