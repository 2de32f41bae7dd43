//! A single game: a hidden secret that answers guesses with feedback.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::feedback::{compare, Code, Feedback};
use crate::params::{GameParams, MAX_CODE_LENGTH};

#[derive(Debug, Clone)]
pub struct Game {
    params: GameParams,
    secret: Code,
    steps: usize,
    finished: bool,
    last_feedback: Option<Feedback>,
}

impl Game {
    /// Start a game with a known secret.
    pub fn new(params: GameParams, secret: Code) -> Result<Self> {
        let secret = Code::from_digits(secret.digits(), &params)?;
        Ok(Self {
            params,
            secret,
            steps: 0,
            finished: false,
            last_feedback: None,
        })
    }

    /// Start a game with a uniformly drawn secret.
    pub fn random(params: GameParams) -> Self {
        Self::with_rng(params, &mut StdRng::from_entropy())
    }

    /// Start a game whose secret is drawn from `rng`.
    pub fn with_rng<R: Rng>(params: GameParams, rng: &mut R) -> Self {
        let mut digits = [0u8; MAX_CODE_LENGTH];
        for digit in digits[..params.code_length()].iter_mut() {
            *digit = rng.gen_range(0..params.alphabet_size());
        }
        let secret = Code::from_raw(&digits[..params.code_length()]);
        Self {
            params,
            secret,
            steps: 0,
            finished: false,
            last_feedback: None,
        }
    }

    /// Answer a guess.
    ///
    /// Once the secret has been found further guesses are not counted and
    /// the winning feedback is returned again.
    pub fn step(&mut self, guess: &Code) -> Result<Feedback> {
        if self.finished {
            if let Some(feedback) = self.last_feedback {
                return Ok(feedback);
            }
        }

        guess.check_alphabet(self.params.alphabet_size())?;
        let feedback = compare(&self.secret, guess)?;
        self.steps += 1;
        self.last_feedback = Some(feedback);
        if feedback.is_win(self.params.code_length()) {
            info!("game finished in {} steps", self.steps);
            self.finished = true;
        }
        Ok(feedback)
    }

    /// Reveal the secret.
    pub fn peek_secret(&self) -> &Code {
        &self.secret
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn params(&self) -> &GameParams {
        &self.params
    }
}
