//! Entropy-driven Bulls and Cows solver.
//!
//! The solver keeps the set of codes still consistent with every feedback
//! seen so far and, each turn, plays the guess whose feedback distribution
//! over that set has the highest entropy. Scoring is delegated to
//! [`crate::entropy`]; this module only enumerates guesses and narrows the
//! candidate set.

use std::cmp::Ordering;

use log::debug;
use rayon::prelude::*;

use crate::entropy::{expected_remaining, Distribution};
use crate::error::{Result, ScoreError};
use crate::feedback::{compare, Code, Feedback};
use crate::game::Game;
use crate::params::GameParams;
use crate::space::ActionSpace;

/// Turn limit for automatic solving.
pub const MAX_TURNS: usize = 16;

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub code: Code,
    /// Entropy plus the self-membership bonus; guesses are ranked by this.
    pub score: f64,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub largest_partition: u32,
    pub is_possible_answer: bool,
}

impl GuessAnalysis {
    fn from_distribution(code: Code, distribution: &Distribution) -> Self {
        let entropy = distribution.entropy();
        Self {
            code,
            score: distribution.score(),
            entropy,
            expected_remaining: expected_remaining(entropy, distribution.total()),
            largest_partition: distribution.largest_partition(),
            is_possible_answer: distribution.contains_guess(),
        }
    }

    /// Best first: higher score, then the earlier code.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.code.cmp(&other.code))
    }
}

/// Which codes the solver considers when picking a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuessPool {
    /// Every code of the game, including ones already ruled out.
    #[default]
    AllCodes,
    /// Only codes that are still possible secrets.
    Candidates,
}

/// The main Bulls and Cows solver
#[derive(Debug, Clone)]
pub struct Solver {
    space: ActionSpace,
    possible_answers: Vec<Code>,
    pool: GuessPool,
}

impl Solver {
    pub fn new(params: GameParams) -> Result<Self> {
        let space = ActionSpace::new(params)?;
        Ok(Self {
            possible_answers: space.as_slice().to_vec(),
            space,
            pool: GuessPool::default(),
        })
    }

    pub fn params(&self) -> &GameParams {
        self.space.params()
    }

    pub fn set_guess_pool(&mut self, pool: GuessPool) {
        self.pool = pool;
    }

    pub fn guess_pool(&self) -> GuessPool {
        self.pool
    }

    pub fn remaining_count(&self) -> usize {
        self.possible_answers.len()
    }

    pub fn possible_answers(&self) -> &[Code] {
        &self.possible_answers
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    pub fn reset(&mut self) {
        self.possible_answers = self.space.as_slice().to_vec();
    }

    /// Keep only the candidates that would have produced `feedback` for `guess`.
    pub fn apply_feedback(&mut self, guess: &Code, feedback: Feedback) -> Result<()> {
        let params = *self.params();
        if guess.len() != params.code_length() {
            return Err(ScoreError::LengthMismatch {
                expected: params.code_length(),
                found: guess.len(),
            });
        }
        guess.check_alphabet(params.alphabet_size())?;

        let before = self.possible_answers.len();
        self.possible_answers
            .retain(|candidate| compare(candidate, guess).map_or(false, |fb| fb == feedback));
        debug!(
            "{} -> {} kept {} of {} candidates",
            guess,
            feedback,
            self.possible_answers.len(),
            before
        );
        Ok(())
    }

    /// Analyze a single guess against the current candidates.
    pub fn analyze(&self, guess: &Code) -> Result<GuessAnalysis> {
        let distribution = Distribution::build(
            guess,
            &self.possible_answers,
            self.params().alphabet_size(),
        )?;
        Ok(GuessAnalysis::from_distribution(*guess, &distribution))
    }

    fn valid_guesses(&self) -> &[Code] {
        match self.pool {
            GuessPool::AllCodes => self.space.as_slice(),
            GuessPool::Candidates => &self.possible_answers,
        }
    }

    pub fn find_best_guess(&self) -> Result<Option<GuessAnalysis>> {
        if self.possible_answers.len() == 1 {
            return self.analyze(&self.possible_answers[0]).map(Some);
        }
        if self.possible_answers.is_empty() {
            return Ok(None);
        }

        let analyses = self
            .valid_guesses()
            .par_iter()
            .map(|guess| self.analyze(guess))
            .collect::<Result<Vec<_>>>()?;

        Ok(analyses
            .into_iter()
            .min_by(|a, b| a.rank(b)))
    }

    /// The `n` best guesses, best first.
    pub fn find_best_guesses(&self, n: usize) -> Result<Vec<GuessAnalysis>> {
        if self.possible_answers.is_empty() {
            return Ok(vec![]);
        }

        if self.possible_answers.len() == 1 {
            return Ok(vec![self.analyze(&self.possible_answers[0])?]);
        }

        let mut analyses = self
            .valid_guesses()
            .par_iter()
            .map(|guess| self.analyze(guess))
            .collect::<Result<Vec<_>>>()?;

        analyses.sort_by(|a, b| a.rank(b));
        analyses.truncate(n);
        Ok(analyses)
    }

    /// Solve a puzzle automatically, given a function that provides feedback.
    /// Returns the sequence of guesses made.
    pub fn solve_with_feedback<F>(&mut self, mut get_feedback: F) -> Result<Vec<(Code, Feedback)>>
    where
        F: FnMut(&Code) -> Result<Feedback>,
    {
        let code_length = self.params().code_length();
        let mut guesses = Vec::new();

        for turn in 1..=MAX_TURNS {
            let best = match self.find_best_guess()? {
                Some(g) => g,
                None => break,
            };

            let feedback = get_feedback(&best.code)?;
            debug!(
                "turn {}: {} ({:.4} bits) -> {}",
                turn, best.code, best.entropy, feedback
            );
            guesses.push((best.code, feedback));

            if feedback.is_win(code_length) {
                break;
            }

            self.apply_feedback(&best.code, feedback)?;
        }

        Ok(guesses)
    }

    /// Solve a puzzle knowing the secret (for testing/benchmarking)
    pub fn solve_for_secret(&mut self, secret: &Code) -> Result<Vec<(Code, Feedback)>> {
        self.solve_with_feedback(|guess| compare(secret, guess))
    }

    /// Play a game to the end against its hidden secret.
    pub fn play(&mut self, game: &mut Game) -> Result<Vec<(Code, Feedback)>> {
        self.solve_with_feedback(|guess| game.step(guess))
    }

    /// Distribution of guess counts when solving for each of `secrets`.
    pub fn benchmark_guess_distribution(&self, secrets: &[Code]) -> Result<Vec<(usize, usize)>> {
        let guess_counts = secrets
            .par_iter()
            .map(|secret| {
                let mut solver = self.clone();
                solver.reset();
                solver.solve_for_secret(secret).map(|guesses| guesses.len())
            })
            .collect::<Result<Vec<usize>>>()?;

        let max_guesses = guess_counts.iter().copied().max().unwrap_or(0);
        let mut distribution = vec![0usize; max_guesses + 1];

        for count in guess_counts {
            distribution[count] += 1;
        }

        Ok(distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    /// Average number of guesses needed over `secrets`.
    pub fn benchmark_average_guesses(&self, secrets: &[Code]) -> Result<f64> {
        if secrets.is_empty() {
            return Ok(0.0);
        }
        let distribution = self.benchmark_guess_distribution(secrets)?;
        let total: usize = distribution.iter().map(|(guesses, count)| guesses * count).sum();
        Ok(total as f64 / secrets.len() as f64)
    }
}
