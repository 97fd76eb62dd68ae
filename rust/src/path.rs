//! Recovery of the selected intervals from a computed value table.

use thiserror::Error;

use crate::models::ValueTableEntry;

/// Errors raised when a value table cannot yield a consistent path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// `best_total_value` increases at this position.
    #[error("Value table is not non-increasing at position {position}")]
    NotMonotonic { position: usize },
    /// The table ran out before the optimum was fully accounted for.
    #[error("Value table exhausted with {remaining} value unaccounted for")]
    Incomplete { remaining: i64 },
    /// An included entry contributes more than the value still unaccounted for.
    #[error("Entry at position {position} contributes {contribution} but only {remaining} remains")]
    Overshoot {
        position: usize,
        contribution: i64,
        remaining: i64,
    },
}

fn check_monotonic(table: &[ValueTableEntry]) -> Result<(), PathError> {
    match table
        .windows(2)
        .position(|pair| pair[1].best_total_value > pair[0].best_total_value)
    {
        Some(pos) => Err(PathError::NotMonotonic { position: pos + 1 }),
        None => Ok(()),
    }
}

/// Walk the value table and return the ids of an optimal selection.
///
/// The walk is a single forward scan: a position is taken when its interval
/// was included and the value still to be accounted for equals the
/// position's best total. Positions that overlap an already taken interval
/// never satisfy both conditions, so no jump to the successor is needed.
///
/// # Returns
/// * `Ok(ids)` in ascending start order; empty when the optimum is not positive
/// * `Err(PathError::NotMonotonic)` if the table's values ever increase
/// * `Err(PathError::Incomplete)` if the optimum cannot be fully reconstructed
/// * `Err(PathError::Overshoot)` if a selected weight exceeds what remains
pub fn reconstruct(table: &[ValueTableEntry]) -> Result<Vec<usize>, PathError> {
    check_monotonic(table)?;

    let mut path = Vec::new();
    let Some(first) = table.first() else {
        return Ok(path);
    };

    let mut remaining = first.best_total_value;
    for (position, entry) in table.iter().enumerate() {
        if remaining <= 0 {
            break;
        }
        if entry.is_included() && entry.best_total_value == remaining {
            if entry.own_contribution > remaining {
                return Err(PathError::Overshoot {
                    position,
                    contribution: entry.own_contribution,
                    remaining,
                });
            }
            path.push(entry.original_id);
            remaining -= entry.own_contribution;
        }
    }

    if remaining != 0 {
        return Err(PathError::Incomplete { remaining });
    }

    Ok(path)
}
