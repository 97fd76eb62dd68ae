//! Core data types for weighted interval scheduling.

use rustc_hash::FxHashMap;

/// A weighted interval `[start, finish)`.
///
/// Two intervals are compatible when one finishes at or before the other
/// starts, so touching endpoints do not overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: i64,
    pub finish: i64,
    pub weight: i64,
    /// Stable identifier into the caller's (unsorted) collection.
    pub id: usize,
}

impl Interval {
    pub fn new(start: i64, finish: i64, weight: i64, id: usize) -> Self {
        Self {
            start,
            finish,
            weight,
            id,
        }
    }

    /// Check whether this interval can be selected together with `other`.
    #[inline]
    pub fn is_compatible_with(&self, other: &Interval) -> bool {
        self.finish <= other.start || other.finish <= self.start
    }
}

/// The caller-owned input collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Build a set from `(start, finish, weight)` triples, using the input
    /// index as each interval's id.
    pub fn from_triples(triples: &[(i64, i64, i64)]) -> Self {
        let intervals = triples
            .iter()
            .enumerate()
            .map(|(id, &(start, finish, weight))| Interval::new(start, finish, weight, id))
            .collect();
        Self { intervals }
    }

    /// Look up an interval by its identifier.
    pub fn get(&self, id: usize) -> Option<&Interval> {
        // Ids usually match the input index; fall back to a scan otherwise
        self.intervals
            .get(id)
            .filter(|iv| iv.id == id)
            .or_else(|| self.intervals.iter().find(|iv| iv.id == id))
    }

    /// Sum the weights of the intervals named by `ids`, skipping unknown ids.
    pub fn total_weight(&self, ids: &[usize]) -> i64 {
        ids.iter()
            .filter_map(|&id| self.get(id))
            .map(|iv| iv.weight)
            .sum()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// One row of the value table, aligned to the sorted-by-start order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueTableEntry {
    /// Best achievable total from this position to the end of the order.
    pub best_total_value: i64,
    /// Identifier of the interval at this position.
    pub original_id: usize,
    /// The interval's weight if including it wins at this position, else 0.
    pub own_contribution: i64,
}

impl ValueTableEntry {
    pub fn new(best_total_value: i64, original_id: usize, own_contribution: i64) -> Self {
        Self {
            best_total_value,
            original_id,
            own_contribution,
        }
    }

    #[inline]
    pub fn is_included(&self) -> bool {
        self.own_contribution > 0
    }
}

/// Output of the scheduling pass.
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    table: Vec<ValueTableEntry>,
    optimum: i64,
    /// original_id -> table position
    positions: FxHashMap<usize, usize>,
}

impl ScheduleResult {
    pub(crate) fn new(table: Vec<ValueTableEntry>, optimum: i64) -> Self {
        let positions = table
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.original_id, pos))
            .collect();
        Self {
            table,
            optimum,
            positions,
        }
    }

    /// Maximum total weight of any set of pairwise compatible intervals.
    pub fn optimum(&self) -> i64 {
        self.optimum
    }

    pub fn table(&self) -> &[ValueTableEntry] {
        &self.table
    }

    pub fn into_table(self) -> Vec<ValueTableEntry> {
        self.table
    }

    /// Best value achievable from the interval `id` onward in sorted order.
    pub fn value_to_go(&self, id: usize) -> Option<i64> {
        self.positions
            .get(&id)
            .map(|&pos| self.table[pos].best_total_value)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// An optimal selection: its total value and the chosen interval ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    pub optimum: i64,
    /// Selected ids in ascending start order.
    pub path: Vec<usize>,
}
