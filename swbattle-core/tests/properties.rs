//! Property tests for comparison, sampling and scoring

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use swbattle_core::{
    apply_outcome, compare, run_battle, select_sample, Category, Entity, Outcome, ScoreState,
    Winner,
};

fn category() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::People), Just(Category::Starships)]
}

fn entity(id: i64) -> impl Strategy<Value = Entity> {
    (
        proptest::option::of(0u64..100_000),
        proptest::option::of(0u64..100_000),
    )
        .prop_map(move |(mass, crew)| Entity {
            id,
            name: format!("entity-{}", id),
            mass,
            crew,
        })
}

fn pool() -> impl Strategy<Value = Vec<Entity>> {
    (0usize..12).prop_flat_map(|n| (0..n as i64).map(entity).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn compare_is_antisymmetric(a in entity(1), b in entity(2), c in category()) {
        let forward = compare(&a, &b, c);
        let backward = compare(&b, &a, c);

        prop_assert_eq!(forward.winner, backward.winner.flipped());
        prop_assert_eq!(forward.left_value, backward.right_value);
        prop_assert_eq!(
            forward.winner == Winner::Draw,
            forward.left_value == forward.right_value
        );
    }

    #[test]
    fn sample_has_no_duplicates(pool in pool(), count in 0usize..6, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let picked = select_sample(&pool, count, &mut rng);

        if pool.len() < count {
            prop_assert!(picked.is_empty());
        } else {
            prop_assert_eq!(picked.len(), count);
        }
        let ids: HashSet<i64> = picked.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids.len(), picked.len());
    }

    #[test]
    fn battle_picks_distinct_compatible(pool in pool(), c in category(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let compatible = pool.iter().filter(|e| e.is_compatible(c)).count();

        match run_battle(&pool, c, &mut rng) {
            Some(battle) => {
                prop_assert!(compatible >= 2);
                prop_assert_ne!(battle.left().id, battle.right().id);
                for card in &battle.selected {
                    prop_assert!(card.is_compatible(c));
                    prop_assert!(pool.contains(card));
                }
            }
            None => prop_assert!(compatible < 2),
        }
    }

    #[test]
    fn scores_never_decrease(left in 0u32..1000, right in 0u32..1000, a in entity(1), b in entity(2), c in category()) {
        let start = ScoreState::new(left, right);
        let outcome: Outcome = compare(&a, &b, c);
        let next = apply_outcome(start, &outcome);

        prop_assert!(next.left >= start.left && next.right >= start.right);
        match outcome.winner {
            Winner::Draw => prop_assert_eq!(next, start),
            _ => prop_assert_eq!(next.total(), start.total() + 1),
        }
    }
}

#[test]
fn test_luke_versus_vader() {
    let pool = [
        Entity::new(1, "Luke").with_mass(77),
        Entity::new(2, "Vader").with_mass(136),
    ];

    let outcome = compare(&pool[0], &pool[1], Category::People);
    assert_eq!(
        outcome,
        Outcome {
            winner: Winner::RightWins,
            left_value: 77,
            right_value: 136,
        }
    );
}

#[test]
fn test_single_entity_cannot_battle() {
    let pool = [Entity::new(1, "Luke").with_mass(77)];
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(select_sample(&pool, 2, &mut rng).is_empty());
    assert!(run_battle(&pool, Category::People, &mut rng).is_none());
}
