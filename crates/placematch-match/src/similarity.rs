//! Sequence similarity over normalized keys.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both strings
//! and `M` the total size of the matching blocks found by repeatedly taking
//! the longest common contiguous block and recursing on the unmatched left
//! and right remainders.
//!
//! The Indel similarity (`2 * LCS / T`) bounds this ratio from above, so it is
//! used as a cheap prefilter before the block search.

use std::cmp::Ordering;
use std::collections::HashMap;

use rapidfuzz::distance::indel;

use crate::normalize::NormalizedKey;

/// Absorbs rounding differences between the bound and the exact ratio.
const BOUND_EPSILON: f64 = 1e-9;

/// Scores candidates against one fixed query string.
#[derive(Debug, Clone)]
pub struct SequenceScorer {
    query: Vec<char>,
    positions: HashMap<char, Vec<usize>>,
}

impl SequenceScorer {
    pub fn new(query: &str) -> Self {
        let query: Vec<char> = query.chars().collect();
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in query.iter().enumerate() {
            positions.entry(*c).or_default().push(j);
        }
        Self { query, positions }
    }

    /// Similarity ratio of `candidate` against the query, in `0.0..=1.0`.
    pub fn ratio(&self, candidate: &str) -> f64 {
        let candidate: Vec<char> = candidate.chars().collect();
        let total = candidate.len() + self.query.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len(&candidate) as f64 / total as f64
    }

    /// Upper bound of [`Self::ratio`] from the longest common subsequence.
    pub fn ratio_bound(&self, candidate: &str) -> f64 {
        indel::normalized_similarity(candidate.chars(), self.query.iter().copied())
    }

    fn matched_len(&self, candidate: &[char]) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, candidate.len(), 0, self.query.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.longest_block(candidate, alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            matched += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }
        matched
    }

    /// Longest common block of `candidate[alo..ahi]` and `query[blo..bhi]`.
    ///
    /// Among equally long blocks, the one starting earliest in the candidate
    /// wins, then the one starting earliest in the query.
    fn longest_block(
        &self,
        candidate: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // run length of the block ending at query[j] for the previous candidate char
        let mut run_ending: HashMap<usize, usize> = HashMap::new();
        for (i, c) in candidate.iter().enumerate().take(ahi).skip(alo) {
            let mut next_run: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.positions.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = match j.checked_sub(1) {
                        Some(prev) => run_ending.get(&prev).copied().unwrap_or(0),
                        None => 0,
                    };
                    let size = previous + 1;
                    next_run.insert(j, size);
                    if size > best_size {
                        best_i = i + 1 - size;
                        best_j = j + 1 - size;
                        best_size = size;
                    }
                }
            }
            run_ending = next_run;
        }
        (best_i, best_j, best_size)
    }
}

/// Similarity ratio of `a` compared against `b`.
///
/// Block selection depends on argument order, so the ratio is not strictly
/// symmetric for every pair of strings.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    SequenceScorer::new(b).ratio(a)
}

/// A candidate key with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKey<'a> {
    pub key: &'a NormalizedKey,
    pub score: f64,
}

/// Returns up to `limit` candidates scoring at least `cutoff`, best first.
///
/// Equal scores keep the order in which `candidates` yielded them.
pub fn close_matches<'a, I>(
    query: &str,
    candidates: I,
    cutoff: f64,
    limit: usize,
) -> Vec<ScoredKey<'a>>
where
    I: IntoIterator<Item = &'a NormalizedKey>,
{
    let scorer = SequenceScorer::new(query);
    let mut scored: Vec<ScoredKey<'a>> = candidates
        .into_iter()
        .filter(|key| scorer.ratio_bound(key.as_str()) + BOUND_EPSILON >= cutoff)
        .filter_map(|key| {
            let score = scorer.ratio(key.as_str());
            (score >= cutoff).then_some(ScoredKey { key, score })
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
