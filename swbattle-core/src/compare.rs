//! Comparator - resolve a battle between two entities

use serde::{Deserialize, Serialize};

use crate::entity::{Category, Entity};

/// Which side won a comparison
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    LeftWins,
    RightWins,
    Draw,
}

impl Winner {
    /// The result seen from the other side
    pub fn flipped(self) -> Self {
        match self {
            Winner::LeftWins => Winner::RightWins,
            Winner::RightWins => Winner::LeftWins,
            Winner::Draw => Winner::Draw,
        }
    }

    /// Text shown to the player
    pub fn message(self) -> &'static str {
        match self {
            Winner::LeftWins => "Left card wins!",
            Winner::RightWins => "Right card wins!",
            Winner::Draw => "It's a draw!",
        }
    }
}

/// Result of comparing two entities
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub winner: Winner,
    pub left_value: u64,
    pub right_value: u64,
}

/// Compare two entities on the field of `category`.
///
/// A missing field counts as 0 here. Pools are filtered for compatibility
/// before selection, so this only matters for callers that compare directly.
pub fn compare(left: &Entity, right: &Entity, category: Category) -> Outcome {
    let field = category.field();
    let left_value = left.value(field).unwrap_or(0);
    let right_value = right.value(field).unwrap_or(0);

    let winner = if left_value > right_value {
        Winner::LeftWins
    } else if right_value > left_value {
        Winner::RightWins
    } else {
        Winner::Draw
    };

    Outcome {
        winner,
        left_value,
        right_value,
    }
}
