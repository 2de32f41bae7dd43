//! Game parameters: the digit alphabet size and the code length.

use crate::error::{Result, ScoreError};

/// Largest supported digit alphabet. Digits render as `0-9a-f`.
pub const MAX_ALPHABET_SIZE: usize = 16;

/// Longest supported code.
pub const MAX_CODE_LENGTH: usize = 8;

/// Largest action space the solver will enumerate. Scoring alone has no
/// such limit.
pub const MAX_ACTION_SPACE: usize = 1 << 20;

/// Upper bound on distribution buckets, `(L + 1) * D` at the largest sizes.
pub const MAX_BUCKETS: usize = (MAX_CODE_LENGTH + 1) * MAX_ALPHABET_SIZE;

/// Alphabet size and code length of a game.
///
/// The feedback bucket encoding `bulls * D + cows` only stays collision free
/// while `cows < D`, so construction insists on `D > L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameParams {
    alphabet_size: u8,
    code_length: usize,
}

impl GameParams {
    /// The classic game: four positions over the ten decimal digits.
    pub const CLASSIC: Self = Self {
        alphabet_size: 10,
        code_length: 4,
    };

    pub fn new(alphabet_size: u8, code_length: usize) -> Result<Self> {
        let d = alphabet_size as usize;
        if !(2..=MAX_ALPHABET_SIZE).contains(&d) {
            return Err(ScoreError::InvalidParams(format!(
                "alphabet size {d} must be between 2 and {MAX_ALPHABET_SIZE}"
            )));
        }
        if !(1..=MAX_CODE_LENGTH).contains(&code_length) {
            return Err(ScoreError::InvalidParams(format!(
                "code length {code_length} must be between 1 and {MAX_CODE_LENGTH}"
            )));
        }
        if d <= code_length {
            return Err(ScoreError::InvalidParams(format!(
                "alphabet size {d} must exceed code length {code_length}"
            )));
        }
        Ok(Self {
            alphabet_size,
            code_length,
        })
    }

    pub fn alphabet_size(&self) -> u8 {
        self.alphabet_size
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Number of feedback buckets needed to hold every `(bulls, cows)` pair.
    pub fn bucket_count(&self) -> usize {
        (self.code_length + 1) * self.alphabet_size as usize
    }

    /// Number of distinct codes, `D^L`.
    pub fn action_space_size(&self) -> usize {
        (self.alphabet_size as usize).pow(self.code_length as u32)
    }

    /// Fails when the action space is too large to enumerate.
    pub fn check_enumerable(&self) -> Result<()> {
        let size = self.action_space_size();
        if size > MAX_ACTION_SPACE {
            return Err(ScoreError::InvalidParams(format!(
                "{} codes exceed the enumerable limit of {MAX_ACTION_SPACE}",
                size
            )));
        }
        Ok(())
    }
}

impl Default for GameParams {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Checks an alphabet size handed straight to the scorer.
pub(crate) fn check_alphabet(alphabet_size: u8, code_length: usize) -> Result<()> {
    GameParams::new(alphabet_size, code_length).map(|_| ())
}
