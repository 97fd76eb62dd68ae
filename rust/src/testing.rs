//! Shared helpers for randomized tests.

use rand::Rng;

use crate::models::Interval;

/// Random intervals with ids `0..n`, where `n` is drawn from `0..=max_len`.
///
/// Starts lie in `1..=40` and lengths in `0..=40`, so ties, touching endpoints
/// and zero-length intervals all occur regularly.
pub(crate) fn random_intervals<R: Rng>(rng: &mut R, max_len: usize) -> Vec<Interval> {
    let n = rng.random_range(0..=max_len);
    (0..n)
        .map(|id| {
            let start = rng.random_range(1..=40);
            let length = rng.random_range(0..=40);
            let weight = rng.random_range(1..=40);
            Interval::new(start, start + length, weight, id)
        })
        .collect()
}

/// Best total weight over all pairwise compatible subsets, by enumeration.
pub(crate) fn brute_force_optimum(intervals: &[Interval]) -> i64 {
    assert!(intervals.len() <= 16, "brute force is exponential");
    let n = intervals.len();
    let mut best = 0;

    for mask in 0u32..(1 << n) {
        let chosen: Vec<&Interval> = (0..n)
            .filter(|&i| mask & (1 << i) != 0)
            .map(|i| &intervals[i])
            .collect();
        let feasible = chosen
            .iter()
            .enumerate()
            .all(|(i, a)| chosen[i + 1..].iter().all(|b| a.is_compatible_with(b)));
        if feasible {
            best = best.max(chosen.iter().map(|iv| iv.weight).sum());
        }
    }

    best
}
