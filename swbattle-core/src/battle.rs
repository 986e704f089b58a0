//! Battle orchestration - filter, sample, compare

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::compare::{compare, Outcome};
use crate::entity::{Category, Entity};
use crate::select::select_sample;

/// A resolved battle: the two selected cards and the comparison outcome
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub selected: [Entity; 2],
    pub outcome: Outcome,
}

impl Battle {
    pub fn left(&self) -> &Entity {
        &self.selected[0]
    }

    pub fn right(&self) -> &Entity {
        &self.selected[1]
    }
}

/// Entities in `pool` that carry the field compared by `category`
pub fn compatible_pool(pool: &[Entity], category: Category) -> Vec<&Entity> {
    pool.iter()
        .filter(|entity| entity.is_compatible(category))
        .collect()
}

/// Pick two compatible entities at random and resolve the battle.
///
/// Returns `None` when fewer than two entities in the pool are compatible
/// with `category`.
pub fn run_battle<R>(pool: &[Entity], category: Category, rng: &mut R) -> Option<Battle>
where
    R: Rng + ?Sized,
{
    let candidates = compatible_pool(pool, category);
    let picked = select_sample(&candidates, 2, rng);

    let [left, right] = picked.as_slice() else {
        return None;
    };

    let outcome = compare(left, right, category);

    Some(Battle {
        selected: [Entity::clone(left), Entity::clone(right)],
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Winner;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_two_card_pool_always_battles() {
        let pool = vec![
            Entity::new(1, "Luke").with_mass(77),
            Entity::new(2, "Vader").with_mass(136),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..10 {
            let battle = run_battle(&pool, Category::People, &mut rng).unwrap();
            assert_ne!(battle.left().id, battle.right().id);

            // Whichever side Vader lands on, he wins
            let expected = if battle.left().id == 2 {
                Winner::LeftWins
            } else {
                Winner::RightWins
            };
            assert_eq!(battle.outcome.winner, expected);
        }
    }

    #[test]
    fn test_single_entity_pool_is_none() {
        let pool = vec![Entity::new(1, "Luke").with_mass(77)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert!(run_battle(&pool, Category::People, &mut rng).is_none());
        assert!(run_battle(&[], Category::People, &mut rng).is_none());
    }

    #[test]
    fn test_incompatible_entities_filtered() {
        let pool = vec![
            Entity::new(1, "Luke").with_mass(77),
            Entity::new(2, "Mystery"),
            Entity::new(3, "X-wing").with_crew(1),
            Entity::new(4, "Vader").with_mass(136),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert_eq!(compatible_pool(&pool, Category::People).len(), 2);

        for _ in 0..20 {
            let battle = run_battle(&pool, Category::People, &mut rng).unwrap();
            for card in &battle.selected {
                assert!(card.is_compatible(Category::People));
            }
        }
    }

    #[test]
    fn test_not_enough_compatible_is_none() {
        // Plenty of entities, but only one carries crew
        let pool = vec![
            Entity::new(1, "Luke").with_mass(77),
            Entity::new(2, "Vader").with_mass(136),
            Entity::new(3, "X-wing").with_crew(1),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert!(run_battle(&pool, Category::Starships, &mut rng).is_none());
    }

    #[test]
    fn test_outcome_matches_selected_order() {
        let pool: Vec<Entity> = (1..=6)
            .map(|i| Entity::new(i, format!("Ship {}", i)).with_crew(i as u64 * 10))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(77);

        for _ in 0..20 {
            let battle = run_battle(&pool, Category::Starships, &mut rng).unwrap();
            assert_eq!(battle.outcome.left_value, battle.left().crew.unwrap());
            assert_eq!(battle.outcome.right_value, battle.right().crew.unwrap());
        }
    }
}
