//! Value table computation for weighted interval scheduling.
//!
//! Intervals are ordered by start time and the table is filled right to left:
//! each position either includes its interval (adding the value of the
//! earliest compatible successor) or skips it (inheriting the next position's
//! value).

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::{LookupStrategy, SchedulerConfig};
use crate::models::{Interval, ScheduleResult, ValueTableEntry};
use crate::path::PathError;
use crate::{log_changes, log_checks, log_debug};

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid interval {id}: finish {finish} is before start {start}")]
    InvalidInterval { id: usize, start: i64, finish: i64 },
    #[error("Duplicate interval id: {0}")]
    DuplicateId(usize),
    #[error("Total weight overflows at interval {0}")]
    WeightOverflow(usize),
    #[error("Unknown lookup strategy: {0}")]
    UnknownLookupStrategy(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Reject malformed intervals and repeated ids, in input order.
fn validate(intervals: &[Interval]) -> Result<(), SchedulerError> {
    let mut seen: FxHashSet<usize> =
        FxHashSet::with_capacity_and_hasher(intervals.len(), Default::default());

    for iv in intervals {
        if iv.finish < iv.start {
            return Err(SchedulerError::InvalidInterval {
                id: iv.id,
                start: iv.start,
                finish: iv.finish,
            });
        }
        if !seen.insert(iv.id) {
            return Err(SchedulerError::DuplicateId(iv.id));
        }
    }

    Ok(())
}

/// Copy the intervals and order them by (start, finish, id).
///
/// Shorter intervals come first among equal starts so a zero-length interval
/// can be followed by intervals starting at the same instant.
fn sorted_by_start(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_unstable_by_key(|iv| (iv.start, iv.finish, iv.id));
    sorted
}

/// Sorted start times, searchable for the earliest compatible successor.
struct SuccessorIndex {
    starts: Vec<i64>,
    strategy: LookupStrategy,
}

impl SuccessorIndex {
    fn new(sorted: &[Interval], strategy: LookupStrategy) -> Self {
        Self {
            starts: sorted.iter().map(|iv| iv.start).collect(),
            strategy,
        }
    }

    /// First position after `pos` whose start is at or after `finish`.
    fn earliest_compatible(&self, pos: usize, finish: i64) -> Option<usize> {
        let n = self.starts.len();
        let next = match self.strategy {
            // Clamp handles zero-length intervals, whose own start satisfies the bound
            LookupStrategy::Binary => self.starts.partition_point(|&s| s < finish).max(pos + 1),
            LookupStrategy::Linear => (pos + 1..n)
                .find(|&j| self.starts[j] >= finish)
                .unwrap_or(n),
        };
        (next < n).then_some(next)
    }
}

/// Compute the value table and the global optimum.
///
/// # Arguments
/// * `intervals` - Intervals in caller order; ids must be unique
/// * `config` - Lookup strategy and verbosity
///
/// # Returns
/// * `Ok(ScheduleResult)` with one table entry per interval, ordered by start
/// * `Err(SchedulerError::InvalidInterval)` if any interval finishes before it starts
/// * `Err(SchedulerError::DuplicateId)` if two intervals share an id
/// * `Err(SchedulerError::WeightOverflow)` if a running total exceeds `i64`
pub fn compute(
    intervals: &[Interval],
    config: &SchedulerConfig,
) -> Result<ScheduleResult, SchedulerError> {
    validate(intervals)?;

    let verbosity = config.verbosity;
    let sorted = sorted_by_start(intervals);
    let index = SuccessorIndex::new(&sorted, config.lookup);
    let n = sorted.len();

    let mut table: Vec<ValueTableEntry> = sorted
        .iter()
        .map(|iv| ValueTableEntry::new(0, iv.id, 0))
        .collect();

    for pos in (0..n).rev() {
        let iv = &sorted[pos];

        // Past the last position the remaining suffix is empty and worth 0
        let skip_value = table.get(pos + 1).map_or(0, |e| e.best_total_value);

        let successor = index.earliest_compatible(pos, iv.finish);
        let continuation = successor.map_or(0, |j| table[j].best_total_value);
        log_debug!(
            verbosity,
            "  interval {} [{}, {}): successor {:?}, continuation {}",
            iv.id,
            iv.start,
            iv.finish,
            successor.map(|j| sorted[j].id),
            continuation
        );

        let include_value = iv
            .weight
            .checked_add(continuation)
            .ok_or(SchedulerError::WeightOverflow(iv.id))?;

        let entry = &mut table[pos];
        if include_value > skip_value {
            entry.best_total_value = include_value;
            entry.own_contribution = iv.weight;
        } else {
            entry.best_total_value = skip_value;
            entry.own_contribution = 0;
        }
        log_checks!(
            verbosity,
            "  position {} (interval {}): include={} skip={} -> {}",
            pos,
            iv.id,
            include_value,
            skip_value,
            if entry.is_included() { "include" } else { "skip" }
        );
    }

    let optimum = table.first().map_or(0, |e| e.best_total_value);
    debug_assert_eq!(
        optimum,
        table.iter().map(|e| e.best_total_value).max().unwrap_or(0)
    );
    log_changes!(
        verbosity,
        "Computed value table for {} intervals ({} lookup): optimum {}",
        n,
        config.lookup,
        optimum
    );

    Ok(ScheduleResult::new(table, optimum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{brute_force_optimum, random_intervals};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn run(triples: &[(i64, i64, i64)]) -> ScheduleResult {
        let intervals: Vec<Interval> = triples
            .iter()
            .enumerate()
            .map(|(id, &(s, f, w))| Interval::new(s, f, w, id))
            .collect();
        compute(&intervals, &SchedulerConfig::default()).unwrap()
    }

    fn assert_non_increasing(table: &[ValueTableEntry]) {
        for pair in table.windows(2) {
            assert!(
                pair[0].best_total_value >= pair[1].best_total_value,
                "table not monotonic: {:?}",
                table
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let result = compute(&[], &SchedulerConfig::default()).unwrap();
        assert_eq!(result.optimum(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_overlaps() {
        let result = run(&[(0, 1, 5), (2, 3, 7), (4, 5, 3)]);
        assert_eq!(result.optimum(), 15);
        let table = result.table();
        assert_eq!(table[0], ValueTableEntry::new(15, 0, 5));
        assert_eq!(table[1], ValueTableEntry::new(10, 1, 7));
        assert_eq!(table[2], ValueTableEntry::new(3, 2, 3));
    }

    #[test]
    fn test_full_overlap_distinct_weights() {
        let result = run(&[(0, 10, 4), (1, 9, 9), (2, 8, 2)]);
        assert_eq!(result.optimum(), 9);
        let table = result.table();
        // Sorted by start: ids 0, 1, 2
        assert_eq!(table[0], ValueTableEntry::new(9, 0, 0));
        assert_eq!(table[1], ValueTableEntry::new(9, 1, 9));
        assert_eq!(table[2], ValueTableEntry::new(2, 2, 2));
    }

    #[test]
    fn test_touching_intervals_are_compatible() {
        let result = run(&[(0, 5, 10), (5, 10, 10)]);
        assert_eq!(result.optimum(), 20);
    }

    #[test]
    fn test_table_sorted_by_start_with_original_ids() {
        let result = run(&[(4, 6, 1), (0, 2, 1), (2, 4, 1)]);
        let ids: Vec<usize> = result.table().iter().map(|e| e.original_id).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        assert_eq!(result.value_to_go(1), Some(3));
        assert_eq!(result.value_to_go(0), Some(1));
    }

    #[test]
    fn test_last_entry_includes_its_weight() {
        let result = run(&[(0, 3, 2), (1, 4, 6), (2, 9, 4)]);
        let last = result.table().last().unwrap();
        assert_eq!(last.best_total_value, 4);
        assert_eq!(last.own_contribution, 4);
    }

    #[test]
    fn test_zero_length_interval_precedes_same_start() {
        // [3, 3) touches [3, 8) and [0, 3)
        let result = run(&[(3, 8, 5), (3, 3, 2), (0, 3, 1)]);
        assert_eq!(result.optimum(), 8);
        let ids: Vec<usize> = result.table().iter().map(|e| e.original_id).collect();
        assert_eq!(ids, vec![2, 1, 0]);
    }

    #[test]
    fn test_non_positive_weights_never_included() {
        let result = run(&[(0, 2, -5), (2, 4, 0), (4, 6, 3), (6, 8, -1)]);
        assert_eq!(result.optimum(), 3);
        for entry in result.table() {
            assert_eq!(entry.is_included(), entry.original_id == 2);
        }
    }

    #[test]
    fn test_all_negative_weights_give_zero() {
        let result = run(&[(0, 2, -5), (1, 4, -2)]);
        assert_eq!(result.optimum(), 0);
        assert!(result.table().iter().all(|e| !e.is_included()));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let intervals = vec![Interval::new(0, 5, 1, 0), Interval::new(7, 6, 1, 1)];
        let err = compute(&intervals, &SchedulerConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::InvalidInterval {
                id: 1,
                start: 7,
                finish: 6
            }
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let intervals = vec![Interval::new(0, 5, 1, 3), Interval::new(6, 7, 1, 3)];
        let err = compute(&intervals, &SchedulerConfig::default()).unwrap_err();
        assert_eq!(err, SchedulerError::DuplicateId(3));
    }

    #[test]
    fn test_weight_overflow_reported() {
        let intervals = vec![
            Interval::new(0, 1, i64::MAX, 0),
            Interval::new(1, 2, i64::MAX, 1),
        ];
        let err = compute(&intervals, &SchedulerConfig::default()).unwrap_err();
        assert_eq!(err, SchedulerError::WeightOverflow(0));
    }

    #[test]
    fn test_successor_lookup_strategies_agree() {
        let mut rng = StdRng::seed_from_u64(11);
        let binary = SchedulerConfig::default();
        let linear = SchedulerConfig {
            lookup: LookupStrategy::Linear,
            verbosity: 0,
        };
        for _ in 0..50 {
            let intervals = random_intervals(&mut rng, 40);
            let a = compute(&intervals, &binary).unwrap();
            let b = compute(&intervals, &linear).unwrap();
            assert_eq!(a.table(), b.table());
            assert_eq!(a.optimum(), b.optimum());
        }
    }

    #[test]
    fn test_optimum_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let intervals = random_intervals(&mut rng, 12);
            let result = compute(&intervals, &SchedulerConfig::default()).unwrap();
            assert_eq!(
                result.optimum(),
                brute_force_optimum(&intervals),
                "intervals: {:?}",
                intervals
            );
        }
    }

    #[test]
    fn test_table_is_monotonic_and_a_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let intervals = random_intervals(&mut rng, 30);
            let result = compute(&intervals, &SchedulerConfig::default()).unwrap();
            assert_eq!(result.len(), intervals.len());
            assert_non_increasing(result.table());

            let mut ids: Vec<usize> = result.table().iter().map(|e| e.original_id).collect();
            ids.sort_unstable();
            assert_eq!(ids, (0..intervals.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_optimum_invariant_under_input_order() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let mut intervals = random_intervals(&mut rng, 25);
            let expected = compute(&intervals, &SchedulerConfig::default())
                .unwrap()
                .optimum();
            intervals.shuffle(&mut rng);
            let shuffled = compute(&intervals, &SchedulerConfig::default()).unwrap();
            assert_eq!(shuffled.optimum(), expected);
        }
    }
}
