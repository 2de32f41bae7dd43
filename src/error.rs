//! Errors surfaced by the comparator, the scorer and the layers built on them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Two codes (or a code and the configured length) disagree on length.
    #[error("code length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A digit falls outside `[0, alphabet_size)`.
    #[error("digit {digit} is outside the alphabet of size {alphabet_size}")]
    InvalidDigit { digit: u32, alphabet_size: u8 },

    /// A character that is not a digit in the configured radix.
    #[error("character {0:?} is not a valid digit")]
    InvalidCharacter(char),

    #[error("candidate set is empty")]
    EmptyCandidateSet,

    #[error("invalid game parameters: {0}")]
    InvalidParams(String),

    #[error("invalid feedback {0:?}, expected something like 1A2B")]
    InvalidFeedback(String),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
