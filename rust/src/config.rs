//! Configuration types for the interval scheduler.

use std::fmt;
use std::str::FromStr;

use crate::scheduler::SchedulerError;

/// How the earliest compatible successor of an interval is located.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Binary search over the sorted start times, O(log n) per lookup.
    #[default]
    Binary,
    /// Forward scan from the next position, O(n) per lookup.
    ///
    /// Quadratic overall; kept as a cross-check for small inputs.
    Linear,
}

impl LookupStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupStrategy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Self::Binary),
            "linear" => Ok(Self::Linear),
            other => Err(SchedulerError::UnknownLookupStrategy(other.to_string())),
        }
    }
}

/// Configuration for computing the value table.
#[derive(Clone, Debug, Default)]
pub struct SchedulerConfig {
    /// Successor lookup strategy
    pub lookup: LookupStrategy,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl SchedulerConfig {
    /// Build a config from a strategy name, validating it upfront.
    pub fn new(lookup: &str, verbosity: u8) -> Result<Self, SchedulerError> {
        Ok(Self {
            lookup: lookup.parse()?,
            verbosity,
        })
    }
}
