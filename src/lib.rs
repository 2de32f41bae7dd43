//! # Bulls and Cows Bot
//!
//! An entropy-based solver for Bulls and Cows style codebreaking games.
//!
//! The core is a pair of pure operations: [`compare`] computes the
//! `(bulls, cows)` feedback between two codes, and [`score`] turns the
//! feedback a guess would produce across the remaining candidates into the
//! Shannon entropy of that distribution. [`Solver`] builds a full strategy on
//! top, picking the highest-entropy guess each turn.

pub mod entropy;
pub mod error;
pub mod feedback;
pub mod game;
pub mod params;
pub mod solver;
pub mod space;

pub use entropy::{score, Distribution, SELF_MEMBERSHIP_BONUS};
pub use error::{Result, ScoreError};
pub use feedback::{compare, Code, Feedback};
pub use game::Game;
pub use params::GameParams;
pub use solver::{GuessAnalysis, GuessPool, Solver};
pub use space::ActionSpace;

/// Parse a list of codes for the given game.
pub fn parse_codes<'a, I>(items: I, params: &GameParams) -> Result<Vec<Code>>
where
    I: IntoIterator<Item = &'a str>,
{
    items
        .into_iter()
        .map(|s| Code::parse(s, params))
        .collect()
}
