//! Frequency-based extractive ranking.

use std::collections::HashSet;

use super::frequency::TermFrequencies;
use super::linguistics::Linguistics;

/// Orders candidate sentences by how representative they are of the whole set.
///
/// Case-insensitive repeats are collapsed first, keeping the earliest spelling. Each
/// remaining candidate scores the sum of its terms' frequencies across the distinct
/// candidates, and the list is stably sorted by descending score so ties keep their
/// input order. Repeating a candidate therefore adds no weight to its terms.
/// Ranking an already ranked list returns it unchanged.
#[must_use]
pub fn rank<S: AsRef<str>>(candidates: &[S], linguistics: &dyn Linguistics) -> Vec<String> {
    let mut seen = HashSet::new();
    let distinct: Vec<&str> = candidates
        .iter()
        .map(|candidate| candidate.as_ref())
        .filter(|candidate| seen.insert(candidate.to_lowercase()))
        .collect();

    let frequencies = TermFrequencies::build(&distinct, linguistics);

    let mut scored: Vec<(&str, usize)> = distinct
        .into_iter()
        .map(|candidate| (candidate, frequencies.score(candidate, linguistics)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .map(|(candidate, _)| candidate.to_string())
        .collect()
}

/// Ranks candidates and keeps the best `limit`.
#[must_use]
pub fn top<S: AsRef<str>>(
    candidates: &[S],
    limit: usize,
    linguistics: &dyn Linguistics,
) -> Vec<String> {
    let mut ranked = rank(candidates, linguistics);
    ranked.truncate(limit);
    ranked
}
