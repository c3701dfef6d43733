//! Random Utilities
//!
//! Unbiased shuffling and sampling used to order sessions and build quizzes.
//! Every function takes the random source from the caller so tests can use a
//! seeded generator.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for reproducible runs
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generator seeded from the operating system
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

/// Uniformly random permutation (Fisher-Yates); the input is left untouched
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Pick `min(k, items.len())` elements at distinct indices
///
/// When `k` covers the whole input the result is a shuffle of it. Otherwise
/// indices are drawn uniformly and repeats are rejected.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    k: usize,
    rng: &mut R,
) -> Vec<T> {
    if k == 0 || items.is_empty() {
        return Vec::new();
    }
    if items.len() <= k {
        let mut out = shuffle(items, rng);
        out.truncate(k);
        return out;
    }

    let mut chosen = HashSet::with_capacity(k);
    let mut out = Vec::with_capacity(k);
    while out.len() < k && chosen.len() < items.len() {
        let idx = rng.gen_range(0..items.len());
        if chosen.insert(idx) {
            out.push(items[idx].clone());
        }
    }
    out
}

/// Signed-count variant: non-positive requests yield an empty sample
pub fn sample_count<T: Clone, R: Rng + ?Sized>(items: &[T], k: i64, rng: &mut R) -> Vec<T> {
    if k <= 0 {
        return Vec::new();
    }
    sample_without_replacement(items, usize::try_from(k).unwrap_or(usize::MAX), rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Shuffle Tests ====================

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = seeded_rng(42);
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(&items, &mut rng);

        assert_eq!(shuffled.len(), items.len());
        assert_ne!(shuffled, items);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = seeded_rng(42);
        let items = vec!["a", "b", "c", "d"];
        let _ = shuffle(&items, &mut rng);
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = seeded_rng(42);
        assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&[7], &mut rng), vec![7]);
    }

    #[test]
    fn test_shuffle_positions_roughly_uniform() {
        let mut rng = seeded_rng(7);
        let items = [0usize, 1, 2, 3];
        let mut first_counts = [0u32; 4];
        let trials = 8000;

        for _ in 0..trials {
            first_counts[shuffle(&items, &mut rng)[0]] += 1;
        }

        for count in first_counts {
            let share = count as f64 / trials as f64;
            assert!((share - 0.25).abs() < 0.03, "first-position share {share}");
        }
    }

    // ==================== Sampling Tests ====================

    #[test]
    fn test_sample_zero_is_empty() {
        let mut rng = seeded_rng(42);
        assert!(sample_without_replacement(&[1, 2, 3], 0, &mut rng).is_empty());
        assert!(sample_count(&[1, 2, 3], -2, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_more_than_available_returns_all() {
        let mut rng = seeded_rng(42);
        let mut picked = sample_without_replacement(&['a', 'b', 'c'], 5, &mut rng);

        assert_eq!(picked.len(), 3);
        picked.sort_unstable();
        assert_eq!(picked, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_sample_distinct_indices() {
        let mut rng = seeded_rng(42);
        let items: Vec<usize> = (0..100).collect();

        for k in [1, 5, 50, 99] {
            let picked = sample_without_replacement(&items, k, &mut rng);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(picked.len(), k);
            assert_eq!(unique.len(), k);
        }
    }

    #[test]
    fn test_sample_keeps_value_duplicates_from_distinct_indices() {
        let mut rng = seeded_rng(42);
        let items = ["x", "x", "y"];
        let picked = sample_without_replacement(&items, 3, &mut rng);

        assert_eq!(picked.iter().filter(|v| **v == "x").count(), 2);
    }

    #[test]
    fn test_sample_no_positional_bias() {
        let mut rng = seeded_rng(11);
        let items: Vec<usize> = (0..10).collect();
        let mut hits = [0u32; 10];
        let trials = 5000;

        for _ in 0..trials {
            for v in sample_without_replacement(&items, 3, &mut rng) {
                hits[v] += 1;
            }
        }

        // each index expected in 30% of samples
        for count in hits {
            let rate = count as f64 / trials as f64;
            assert!((rate - 0.3).abs() < 0.04, "inclusion rate {rate}");
        }
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let items: Vec<u32> = (0..20).collect();
        let a = shuffle(&items, &mut seeded_rng(5));
        let b = shuffle(&items, &mut seeded_rng(5));
        assert_eq!(a, b);
    }
}
