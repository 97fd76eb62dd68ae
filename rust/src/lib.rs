//! Weighted interval scheduling.
//!
//! Given a set of weighted intervals, finds a maximum-weight subset of
//! pairwise non-overlapping intervals and reconstructs which intervals it
//! contains. Intervals that only touch at an endpoint are compatible.

pub mod config;
pub mod logging;
mod models;
pub mod path;
#[cfg(feature = "python")]
mod python;
pub mod scheduler;
#[cfg(test)]
mod testing;

pub use config::{LookupStrategy, SchedulerConfig};
pub use models::{Interval, IntervalSet, ScheduleResult, Solution, ValueTableEntry};
pub use path::{reconstruct, PathError};
pub use scheduler::{compute, SchedulerError};

/// Compute the optimum and reconstruct one selection achieving it.
///
/// # Arguments
/// * `intervals` - Intervals with unique ids and `finish >= start`
/// * `config` - Lookup strategy and verbosity
///
/// # Returns
/// * `Ok(Solution)` with the optimum and the selected ids in start order
/// * `Err(SchedulerError)` if the input is malformed
pub fn solve(intervals: &[Interval], config: &SchedulerConfig) -> Result<Solution, SchedulerError> {
    let result = compute(intervals, config)?;
    let path = reconstruct(result.table())?;

    for id in &path {
        log_changes!(config.verbosity, "  selected interval {}", id);
    }

    Ok(Solution {
        optimum: result.optimum(),
        path,
    })
}
