//! Selector - random sampling of battle candidates

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `count` items from `pool` without replacement, in random order.
///
/// Returns an empty vector when the pool holds fewer than `count` items.
/// The pool itself is left untouched; only an index buffer is shuffled.
pub fn select_sample<'a, T, R>(pool: &'a [T], count: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    if pool.len() < count {
        return Vec::new();
    }

    let mut indices: Vec<usize> = (0..pool.len()).collect();
    let (chosen, _) = indices.partial_shuffle(rng, count);

    chosen.iter().map(|&i| &pool[i]).collect()
}
