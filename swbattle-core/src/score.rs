//! Score tracking across rounds

use serde::{Deserialize, Serialize};

use crate::compare::{Outcome, Winner};

/// Win counters for the left and right sides
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub left: u32,
    pub right: u32,
}

impl ScoreState {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    /// Scores after recording `outcome`. Draws leave the state unchanged.
    pub fn apply(self, outcome: &Outcome) -> Self {
        match outcome.winner {
            Winner::LeftWins => Self {
                left: self.left.saturating_add(1),
                ..self
            },
            Winner::RightWins => Self {
                right: self.right.saturating_add(1),
                ..self
            },
            Winner::Draw => self,
        }
    }

    /// Total decided rounds
    pub fn total(&self) -> u32 {
        self.left.saturating_add(self.right)
    }
}

/// Free-function form of [`ScoreState::apply`]
pub fn apply_outcome(state: ScoreState, outcome: &Outcome) -> ScoreState {
    state.apply(outcome)
}
