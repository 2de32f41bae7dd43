//! Entropy scoring of a guess over the candidate set.
//!
//! A guess partitions the remaining candidates by the feedback each of them
//! would produce. The Shannon entropy of that partition is the expected
//! information (in bits) the guess reveals; higher is better.

use log::trace;

use crate::error::{Result, ScoreError};
use crate::feedback::{compare, Code, Feedback};
use crate::params::{check_alphabet, MAX_BUCKETS};

/// Added to the entropy of a guess that is itself still a possible secret.
pub const SELF_MEMBERSHIP_BONUS: f64 = 0.0001;

/// Feedback counts of one guess across a candidate set.
#[derive(Debug, Clone)]
pub struct Distribution {
    counts: [u32; MAX_BUCKETS],
    total: usize,
    alphabet_size: u8,
    contains_guess: bool,
}

impl Distribution {
    /// Bucket the candidates in `memory` by their feedback against `action`.
    pub fn build(action: &Code, memory: &[Code], alphabet_size: u8) -> Result<Self> {
        if memory.is_empty() {
            return Err(ScoreError::EmptyCandidateSet);
        }
        check_alphabet(alphabet_size, action.len())?;
        action.check_alphabet(alphabet_size)?;
        for candidate in memory {
            if candidate.len() != action.len() {
                return Err(ScoreError::LengthMismatch {
                    expected: action.len(),
                    found: candidate.len(),
                });
            }
            candidate.check_alphabet(alphabet_size)?;
        }

        let mut counts = [0u32; MAX_BUCKETS];
        let mut contains_guess = false;
        for candidate in memory {
            let feedback = compare(candidate, action)?;
            counts[feedback.bucket(alphabet_size)] += 1;
            contains_guess |= candidate == action;
        }

        Ok(Self {
            counts,
            total: memory.len(),
            alphabet_size,
            contains_guess,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether the scored guess appeared verbatim in the candidate set.
    pub fn contains_guess(&self) -> bool {
        self.contains_guess
    }

    /// Non-empty partitions in ascending bucket order.
    pub fn partitions(&self) -> impl Iterator<Item = (Feedback, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(bucket, &count)| (Feedback::from_bucket(bucket, self.alphabet_size), count))
    }

    /// Probability mass of every observed feedback.
    pub fn probabilities(&self) -> Vec<(Feedback, f64)> {
        let n = self.total as f64;
        self.partitions()
            .map(|(feedback, count)| (feedback, count as f64 / n))
            .collect()
    }

    /// Size of the worst-case partition.
    pub fn largest_partition(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Shannon entropy in bits, without the membership bonus.
    pub fn entropy(&self) -> f64 {
        let n = self.total as f64;
        let mut entropy = 0.0;
        for &count in &self.counts {
            if count > 0 {
                let p = count as f64 / n;
                entropy -= p * p.log2();
            }
        }
        entropy
    }

    /// Entropy plus [`SELF_MEMBERSHIP_BONUS`] when the guess is a candidate.
    pub fn score(&self) -> f64 {
        let entropy = self.entropy();
        if self.contains_guess {
            entropy + SELF_MEMBERSHIP_BONUS
        } else {
            entropy
        }
    }
}

/// Score `action` against the candidate set `memory`.
///
/// `alphabet_size` sizes the feedback buckets and bounds every digit.
pub fn score(action: &Code, memory: &[Code], alphabet_size: u8) -> Result<f64> {
    let distribution = Distribution::build(action, memory, alphabet_size)?;
    let score = distribution.score();
    trace!(
        "scored {} over {} candidates: {:.6} bits",
        action,
        memory.len(),
        score
    );
    Ok(score)
}

/// Expected number of candidates left after a guess with the given entropy.
pub fn expected_remaining(entropy: f64, candidates: usize) -> f64 {
    candidates as f64 / 2_f64.powf(entropy)
}
