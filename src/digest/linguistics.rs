//! Tokenization, sentence segmentation and stop-word strategies.
//!
//! Two interchangeable backends sit behind the [`Linguistics`] trait. The English
//! backend understands word boundaries, abbreviations and a full stop-word list;
//! the naive backend splits on whitespace and newlines with a short built-in list.
//! A backend is picked once with [`select`] and shared read-only afterwards.

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Linguistic capabilities the frequency analyzer and ranker depend on.
pub trait Linguistics: Send + Sync {
    /// Short backend name for logging.
    fn name(&self) -> &'static str;

    /// Splits text into raw word tokens.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Splits text into sentences, trimmed and non-empty.
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Returns true when a normalized (lower-case, alphanumeric) token carries no meaning.
    fn is_stop_word(&self, token: &str) -> bool;
}

/// Backend selector exposed on the command line and in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinguisticsBackend {
    /// Word-boundary tokenizer with the full English stop-word list.
    #[default]
    English,
    /// Whitespace tokenizer with a minimal stop-word list.
    Naive,
}

/// English stop words: articles, pronouns, conjunctions, prepositions and auxiliaries.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve",
    "youll", "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "shes", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "thatll", "these",
    "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "dont", "should",
    "shouldve", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "arent", "couldn",
    "couldnt", "didn", "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven",
    "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt", "needn", "neednt",
    "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt", "weren", "werent", "won", "wont",
    "wouldn", "wouldnt",
];

/// Built-in list used when the English backend is unavailable.
const FALLBACK_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were",
];

/// Lower-cased words that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "mr", "mrs", "ms", "dr", "approx", "incl", "no", "fig", "cf",
];

/// Word-boundary tokenizer with sentence segmentation and the English stop-word list.
pub struct EnglishLinguistics {
    word: Regex,
    stop_words: HashSet<&'static str>,
}

impl EnglishLinguistics {
    /// Builds the backend.
    pub fn load() -> Result<Self> {
        let word = Regex::new(r"[\p{L}\p{N}_]+(?:['’][\p{L}\p{N}_]+)*|[^\s\p{L}\p{N}_]")
            .context("Failed to compile word tokenizer pattern")?;

        Ok(Self {
            word,
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        })
    }

    fn ends_with_abbreviation(text: &str) -> bool {
        let last_word = text
            .rsplit(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("")
            .trim_end_matches('.')
            .to_lowercase();
        ABBREVIATIONS.contains(&last_word.as_str())
            // single letters like initials or list markers
            || (last_word.chars().count() == 1 && last_word.chars().all(char::is_alphabetic))
    }
}

impl Linguistics for EnglishLinguistics {
    fn name(&self) -> &'static str {
        "english"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.word.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            let boundary = match c {
                '\n' => matches!(chars.peek(), Some((_, '\n'))),
                '.' | '!' | '?' => {
                    // absorb runs like "?!" or "..." and closing quotes/brackets
                    while let Some(&(_, next)) = chars.peek() {
                        if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')' | ']') {
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    let followed_by_space =
                        chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
                    followed_by_space
                        && !(c == '.' && Self::ends_with_abbreviation(&text[start..idx]))
                }
                _ => false,
            };

            if boundary {
                let end = chars.peek().map_or(text.len(), |&(i, _)| i);
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }
        sentences
    }

    fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// Whitespace tokenizer, line-based sentences and a minimal stop-word list.
#[derive(Debug, Default)]
pub struct NaiveLinguistics;

impl Linguistics for NaiveLinguistics {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn is_stop_word(&self, token: &str) -> bool {
        FALLBACK_STOP_WORDS.contains(&token)
    }
}

static ENGLISH: LazyLock<Option<EnglishLinguistics>> = LazyLock::new(|| {
    EnglishLinguistics::load()
        .map_err(|e| info!(error = %e, "English linguistics unavailable, using naive tokenizer"))
        .ok()
});

static NAIVE: NaiveLinguistics = NaiveLinguistics;

/// Returns the shared backend for the requested strategy.
///
/// The English backend is built on first use. If it cannot be built the naive backend
/// is returned instead; this never fails.
pub fn select(backend: LinguisticsBackend) -> &'static dyn Linguistics {
    let selected: &'static dyn Linguistics = match backend {
        LinguisticsBackend::English => match ENGLISH.as_ref() {
            Some(english) => english,
            None => &NAIVE,
        },
        LinguisticsBackend::Naive => &NAIVE,
    };
    debug!(requested = ?backend, backend = selected.name(), "Selected linguistics backend");
    selected
}

/// Lower-cases a raw token and strips everything that is not alphanumeric.
#[must_use]
pub fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tokenizes and normalizes text, dropping empty tokens and stop words.
#[must_use]
pub fn content_terms(linguistics: &dyn Linguistics, text: &str) -> Vec<String> {
    linguistics
        .tokenize(text)
        .into_iter()
        .map(normalize_token)
        .filter(|t| !t.is_empty() && !linguistics.is_stop_word(t))
        .collect()
}
