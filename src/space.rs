//! Enumeration of every code a game allows.

use crate::error::{Result, ScoreError};
use crate::feedback::Code;
use crate::params::GameParams;

/// All `D^L` codes of a game, in ascending order.
#[derive(Debug, Clone)]
pub struct ActionSpace {
    params: GameParams,
    codes: Vec<Code>,
}

impl ActionSpace {
    /// Enumerate every code, refusing spaces above
    /// [`MAX_ACTION_SPACE`](crate::params::MAX_ACTION_SPACE).
    pub fn new(params: GameParams) -> Result<Self> {
        params.check_enumerable()?;
        let codes = (0..params.action_space_size())
            .filter_map(|index| Code::from_index(index, &params))
            .collect();
        Ok(Self { params, codes })
    }

    pub fn params(&self) -> &GameParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Code> {
        self.codes.get(index)
    }

    pub fn as_slice(&self) -> &[Code] {
        &self.codes
    }

    /// `count` codes spread evenly across the space, starting at the first.
    pub fn evenly_spaced(&self, count: usize) -> Result<Vec<Code>> {
        if count == 0 {
            return Err(ScoreError::InvalidParams(
                "sample count must be at least 1".to_string(),
            ));
        }
        let step = (self.codes.len() / count).max(1);
        Ok(self.codes.iter().step_by(step).take(count).copied().collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Code> {
        self.codes.iter()
    }
}

impl<'a> IntoIterator for &'a ActionSpace {
    type Item = &'a Code;
    type IntoIter = std::slice::Iter<'a, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
