//! Battle session - the player-facing state between rounds
//!
//! Holds the active category, the cards currently on the table and the
//! running score. Scores live as long as the session and are only ever
//! advanced, never reset by switching category.

use rand::Rng;
use serde::Serialize;

use crate::battle::{run_battle, Battle};
use crate::entity::{Category, Entity};
use crate::score::{apply_outcome, ScoreState};

/// How a selected card is shown for the active category
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: i64,
    pub name: String,
    pub label: &'static str,
    pub value: Option<u64>,
    pub compatible: bool,
}

impl CardView {
    fn new(entity: &Entity, category: Category) -> Self {
        let value = entity.value(category.field());
        Self {
            id: entity.id,
            name: entity.name.clone(),
            label: category.label(),
            value,
            compatible: value.is_some(),
        }
    }

    /// Value text, `"N/A"` when the card lacks the attribute
    pub fn value_text(&self) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BattleSession {
    category: Category,
    current: Option<Battle>,
    scores: ScoreState,
}

impl BattleSession {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            current: None,
            scores: ScoreState::default(),
        }
    }

    /// Resume from an existing score
    pub fn with_scores(mut self, scores: ScoreState) -> Self {
        self.scores = scores;
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current(&self) -> Option<&Battle> {
        self.current.as_ref()
    }

    pub fn scores(&self) -> ScoreState {
        self.scores
    }

    /// Play a round in the active category.
    ///
    /// When no battle can be formed the table is cleared, so the previous
    /// winner is never shown as current.
    pub fn play<R>(&mut self, pool: &[Entity], rng: &mut R) -> Option<&Battle>
    where
        R: Rng + ?Sized,
    {
        self.current = run_battle(pool, self.category, rng);
        if let Some(battle) = &self.current {
            self.scores = apply_outcome(self.scores, &battle.outcome);
        }
        self.current.as_ref()
    }

    /// Switch category and immediately play a round with `pool`.
    ///
    /// Returns `false` without doing anything if `category` is already active.
    pub fn switch_category<R>(&mut self, category: Category, pool: &[Entity], rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if category == self.category {
            return false;
        }
        self.category = category;
        self.play(pool, rng);
        true
    }

    /// Cards on the table, described for the active category
    pub fn cards(&self) -> Vec<CardView> {
        self.current
            .iter()
            .flat_map(|battle| battle.selected.iter())
            .map(|entity| CardView::new(entity, self.category))
            .collect()
    }

    /// Winner text, hidden unless every card on the table fits the category
    pub fn winner_text(&self) -> Option<&'static str> {
        let battle = self.current.as_ref()?;
        let fits = battle
            .selected
            .iter()
            .all(|entity| entity.is_compatible(self.category));
        fits.then(|| battle.outcome.winner.message())
    }
}
