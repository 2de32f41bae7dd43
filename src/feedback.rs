//! Feedback calculation for Bulls and Cows guesses.
//!
//! This module holds the validated [`Code`] type and computes the
//! `(bulls, cows)` feedback for a guess against a hypothetical secret.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScoreError};
use crate::params::{GameParams, MAX_ALPHABET_SIZE, MAX_CODE_LENGTH};

/// A fixed-length sequence of digits.
///
/// Digits are stored inline; positions past `len` are always zero so the
/// derived comparisons only ever see meaningful data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    digits: [u8; MAX_CODE_LENGTH],
    len: u8,
}

impl Code {
    /// Build a code from raw digit values.
    ///
    /// Only the crate-wide capacity limits are checked here. Use
    /// [`Code::from_digits`] to also check against a game's alphabet and length.
    pub fn new(digits: &[u8]) -> Result<Self> {
        if digits.is_empty() || digits.len() > MAX_CODE_LENGTH {
            let expected = if digits.is_empty() { 1 } else { MAX_CODE_LENGTH };
            return Err(ScoreError::LengthMismatch {
                expected,
                found: digits.len(),
            });
        }
        let mut stored = [0u8; MAX_CODE_LENGTH];
        for (slot, &digit) in stored.iter_mut().zip(digits) {
            if digit as usize >= MAX_ALPHABET_SIZE {
                return Err(ScoreError::InvalidDigit {
                    digit: digit as u32,
                    alphabet_size: MAX_ALPHABET_SIZE as u8,
                });
            }
            *slot = digit;
        }
        Ok(Self {
            digits: stored,
            len: digits.len() as u8,
        })
    }

    /// Build a code that belongs to the game described by `params`.
    pub fn from_digits(digits: &[u8], params: &GameParams) -> Result<Self> {
        if digits.len() != params.code_length() {
            return Err(ScoreError::LengthMismatch {
                expected: params.code_length(),
                found: digits.len(),
            });
        }
        let code = Self::new(digits)?;
        code.check_alphabet(params.alphabet_size())?;
        Ok(code)
    }

    /// Parse a code such as `"0123"`. Characters are digits in radix `D`,
    /// so alphabets above ten use `a-f`.
    pub fn parse(s: &str, params: &GameParams) -> Result<Self> {
        let s = s.trim();
        let found = s.chars().count();
        if found != params.code_length() {
            return Err(ScoreError::LengthMismatch {
                expected: params.code_length(),
                found,
            });
        }

        let radix = params.alphabet_size() as u32;
        let mut digits = [0u8; MAX_CODE_LENGTH];
        for (slot, c) in digits.iter_mut().zip(s.chars()) {
            *slot = match c.to_digit(radix) {
                Some(d) => d as u8,
                None => match c.to_digit(MAX_ALPHABET_SIZE as u32) {
                    Some(digit) => {
                        return Err(ScoreError::InvalidDigit {
                            digit,
                            alphabet_size: params.alphabet_size(),
                        })
                    }
                    None => return Err(ScoreError::InvalidCharacter(c)),
                },
            };
        }
        Self::new(&digits[..found])
    }

    /// The `index`-th code of the action space, counting `00..0` as zero.
    ///
    /// Returns `None` when `index` is past the last code.
    pub fn from_index(mut index: usize, params: &GameParams) -> Option<Self> {
        if index >= params.action_space_size() {
            return None;
        }
        let base = params.alphabet_size() as usize;
        let len = params.code_length();
        let mut digits = [0u8; MAX_CODE_LENGTH];
        for slot in digits[..len].iter_mut().rev() {
            *slot = (index % base) as u8;
            index /= base;
        }
        Some(Self {
            digits,
            len: len as u8,
        })
    }

    /// Build a code from digits already known to fit the game.
    pub(crate) fn from_raw(digits: &[u8]) -> Self {
        let mut stored = [0u8; MAX_CODE_LENGTH];
        stored[..digits.len()].copy_from_slice(digits);
        Self {
            digits: stored,
            len: digits.len() as u8,
        }
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn check_alphabet(&self, alphabet_size: u8) -> Result<()> {
        match self.digits().iter().find(|&&d| d >= alphabet_size) {
            Some(&digit) => Err(ScoreError::InvalidDigit {
                digit: digit as u32,
                alphabet_size,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in self.digits() {
            let c = char::from_digit(d as u32, MAX_ALPHABET_SIZE as u32).unwrap_or('?');
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

/// Feedback for one guess against one secret.
///
/// `bulls` counts exact positional matches; `cows` counts digits present in
/// both codes but at different positions, with each unmatched secret digit
/// credited at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Feedback {
    pub bulls: u8,
    pub cows: u8,
}

impl Feedback {
    pub fn new(bulls: u8, cows: u8) -> Self {
        Self { bulls, cows }
    }

    /// The feedback of a correct guess for codes of length `code_length`.
    pub fn win(code_length: usize) -> Self {
        Self::new(code_length as u8, 0)
    }

    pub fn is_win(self, code_length: usize) -> bool {
        self == Self::win(code_length)
    }

    /// Dense bucket index, `bulls * D + cows`.
    pub fn bucket(self, alphabet_size: u8) -> usize {
        self.bulls as usize * alphabet_size as usize + self.cows as usize
    }

    /// Inverse of [`Feedback::bucket`].
    pub fn from_bucket(bucket: usize, alphabet_size: u8) -> Self {
        let d = alphabet_size as usize;
        Self::new((bucket / d) as u8, (bucket % d) as u8)
    }

    /// Calculate the feedback for a guess against a secret.
    ///
    /// Exact matches are counted first; every unmatched secret digit then
    /// becomes available to at most one displaced guess digit of equal value.
    pub fn calculate(secret: &Code, guess: &Code) -> Result<Self> {
        if secret.len() != guess.len() {
            return Err(ScoreError::LengthMismatch {
                expected: secret.len(),
                found: guess.len(),
            });
        }

        let secret = secret.digits();
        let guess = guess.digits();
        let mut secret_remaining = [0u8; MAX_ALPHABET_SIZE];
        let mut bulls = 0u8;

        for i in 0..secret.len() {
            if secret[i] == guess[i] {
                bulls += 1;
            } else {
                secret_remaining[secret[i] as usize] += 1;
            }
        }

        let mut cows = 0u8;
        for i in 0..guess.len() {
            if secret[i] != guess[i] {
                let idx = guess[i] as usize;
                if secret_remaining[idx] > 0 {
                    cows += 1;
                    secret_remaining[idx] -= 1;
                }
            }
        }

        Ok(Self { bulls, cows })
    }
}

/// Compare a hypothetical `secret` with a `guess`.
pub fn compare(secret: &Code, guess: &Code) -> Result<Feedback> {
    Feedback::calculate(secret, guess)
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}A{}B", self.bulls, self.cows)
    }
}

impl FromStr for Feedback {
    type Err = ScoreError;

    /// Accepts `1A2B`, `1a2b`, `1,2` and `1 2`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScoreError::InvalidFeedback(s.to_string());
        let upper = s.trim().to_ascii_uppercase();

        let (bulls, cows) = if let Some(rest) = upper.strip_suffix('B') {
            rest.split_once('A').ok_or_else(invalid)?
        } else {
            upper
                .split_once(|c: char| c == ',' || c.is_whitespace())
                .ok_or_else(invalid)?
        };

        let bulls = bulls.trim().parse().map_err(|_| invalid())?;
        let cows = cows.trim().parse().map_err(|_| invalid())?;
        Ok(Self { bulls, cows })
    }
}
