//! PyO3 bindings exposing the scheduler as the `wis_rust` Python module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SchedulerConfig;
use crate::models::{Interval, ValueTableEntry};
use crate::path::PathError;
use crate::scheduler::SchedulerError;

impl From<SchedulerError> for PyErr {
    fn from(err: SchedulerError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<PathError> for PyErr {
    fn from(err: PathError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// A weighted interval (PyO3 wrapper).
#[pyclass(name = "Interval")]
#[derive(Clone, Debug)]
pub struct PyInterval {
    #[pyo3(get)]
    pub start: i64,
    #[pyo3(get)]
    pub finish: i64,
    #[pyo3(get)]
    pub weight: i64,
    #[pyo3(get)]
    pub id: usize,
}

#[pymethods]
impl PyInterval {
    #[new]
    fn new(start: i64, finish: i64, weight: i64, id: usize) -> Self {
        Self {
            start,
            finish,
            weight,
            id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Interval(start={}, finish={}, weight={}, id={})",
            self.start, self.finish, self.weight, self.id
        )
    }
}

impl From<&PyInterval> for Interval {
    fn from(iv: &PyInterval) -> Self {
        Interval::new(iv.start, iv.finish, iv.weight, iv.id)
    }
}

/// One value table row (PyO3 wrapper).
#[pyclass(name = "ValueTableEntry")]
#[derive(Clone, Debug)]
pub struct PyValueTableEntry {
    #[pyo3(get, set)]
    pub best_total_value: i64,
    #[pyo3(get, set)]
    pub original_id: usize,
    #[pyo3(get, set)]
    pub own_contribution: i64,
}

#[pymethods]
impl PyValueTableEntry {
    #[new]
    fn new(best_total_value: i64, original_id: usize, own_contribution: i64) -> Self {
        Self {
            best_total_value,
            original_id,
            own_contribution,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ValueTableEntry(best_total_value={}, original_id={}, own_contribution={})",
            self.best_total_value, self.original_id, self.own_contribution
        )
    }
}

impl From<ValueTableEntry> for PyValueTableEntry {
    fn from(e: ValueTableEntry) -> Self {
        Self {
            best_total_value: e.best_total_value,
            original_id: e.original_id,
            own_contribution: e.own_contribution,
        }
    }
}

impl From<&PyValueTableEntry> for ValueTableEntry {
    fn from(e: &PyValueTableEntry) -> Self {
        ValueTableEntry::new(e.best_total_value, e.original_id, e.own_contribution)
    }
}

/// Optimum plus the selected ids (PyO3 wrapper).
#[pyclass(name = "Solution")]
#[derive(Clone, Debug)]
pub struct PySolution {
    #[pyo3(get)]
    pub optimum: i64,
    #[pyo3(get)]
    pub path: Vec<usize>,
}

#[pymethods]
impl PySolution {
    fn __repr__(&self) -> String {
        format!("Solution(optimum={}, path={:?})", self.optimum, self.path)
    }
}

fn to_core(intervals: &[PyInterval]) -> Vec<Interval> {
    intervals.iter().map(Interval::from).collect()
}

/// Compute the value table and optimum.
///
/// # Arguments
/// * `intervals` - List of Interval objects with unique ids
/// * `lookup` - Successor lookup strategy: "binary" or "linear"
/// * `verbosity` - 0=silent, 1=changes, 2=checks, 3=debug
///
/// # Returns
/// * Tuple of (list of ValueTableEntry in start order, optimum)
///
/// # Raises
/// * ValueError if an interval finishes before it starts, ids repeat, or the strategy is unknown
#[pyfunction]
#[pyo3(signature = (intervals, lookup="binary", verbosity=0))]
fn compute(
    intervals: Vec<PyInterval>,
    lookup: &str,
    verbosity: u8,
) -> PyResult<(Vec<PyValueTableEntry>, i64)> {
    let config = SchedulerConfig::new(lookup, verbosity)?;
    let result = crate::scheduler::compute(&to_core(&intervals), &config)?;
    let optimum = result.optimum();
    let table = result
        .into_table()
        .into_iter()
        .map(PyValueTableEntry::from)
        .collect();
    Ok((table, optimum))
}

/// Reconstruct the selected interval ids from a value table.
///
/// # Raises
/// * ValueError if the table is inconsistent
#[pyfunction]
fn reconstruct(table: Vec<PyValueTableEntry>) -> PyResult<Vec<usize>> {
    let table: Vec<ValueTableEntry> = table.iter().map(ValueTableEntry::from).collect();
    Ok(crate::path::reconstruct(&table)?)
}

/// Compute the optimum and the selected ids in one call.
#[pyfunction]
#[pyo3(signature = (intervals, lookup="binary", verbosity=0))]
fn solve(intervals: Vec<PyInterval>, lookup: &str, verbosity: u8) -> PyResult<PySolution> {
    let config = SchedulerConfig::new(lookup, verbosity)?;
    let solution = crate::solve(&to_core(&intervals), &config)?;
    Ok(PySolution {
        optimum: solution.optimum,
        path: solution.path,
    })
}

/// The wis_rust Python module.
#[pymodule]
fn wis_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<PyInterval>()?;
    m.add_class::<PyValueTableEntry>()?;
    m.add_class::<PySolution>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(compute, m)?)?;
    m.add_function(wrap_pyfunction!(reconstruct, m)?)?;
    m.add_function(wrap_pyfunction!(solve, m)?)?;

    Ok(())
}
