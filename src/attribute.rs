//! Attribute-space dissolve.
//!
//! Records are sorted once by the primary (last) dimension; that ordering is
//! reused as the scan order for every dimension.  For each record, the window
//! of later records within the primary tolerance is fixed, and each dimension
//! is checked against every window member.  A record survives only if some
//! dimension distinguishes it from everything in its window.

use log::{debug, trace};
use smallvec::SmallVec;

use crate::error::DissolveError;
use crate::record::{AttributeTable, KeepSet};
use crate::scan::{forward_scan, sort_order, window_end};

/// Dissolve records by their numeric attributes.
///
/// `tolerances` holds one non-negative finite value per table dimension; the
/// last entry is the primary tolerance bounding the comparison window.
/// Returns the ids to retain.  An empty table dissolves to an empty set.
pub fn dissolve_attributes(
    table: &AttributeTable,
    tolerances: &[f64],
) -> Result<KeepSet, DissolveError> {
    let dims = table.dims();
    if tolerances.len() != dims {
        return Err(DissolveError::ToleranceCountMismatch {
            expected: dims,
            got: tolerances.len(),
        });
    }
    if let Some(&t) = tolerances.iter().find(|t| !t.is_finite() || **t < 0.0) {
        return Err(DissolveError::InvalidTolerance(t));
    }
    if table.is_empty() {
        return Ok(KeepSet::default());
    }

    let primary = dims - 1;
    let primary_tol = tolerances[primary];
    let keys: Vec<f64> = (0..table.len()).map(|r| table.value(r, primary)).collect();
    let order = sort_order(&keys);

    let kept = forward_scan(&order, |pos| {
        let end = window_end(&order, pos, |i, k| (keys[k] - keys[i]).abs() <= primary_tol);
        if end == pos + 1 {
            return true; // nothing within the primary tolerance
        }

        let rec = order[pos];
        // One duplicated flag per dimension over the same fixed window; later
        // dimensions never widen or narrow it.
        let mut duplicated: SmallVec<[bool; 8]> = SmallVec::from_elem(false, dims);
        for &other in &order[pos + 1..end] {
            for dim in 0..dims {
                if (table.value(other, dim) - table.value(rec, dim)).abs() <= tolerances[dim] {
                    duplicated[dim] = true;
                }
            }
        }

        let keep = duplicated.iter().any(|&d| !d);
        if !keep {
            trace!(
                "dropping {}: all {dims} dimension(s) duplicated within window of {}",
                table.id(rec),
                end - pos - 1,
            );
        }
        keep
    });

    debug!(
        "attribute dissolve: {} record(s), {dims} dimension(s), kept {}",
        table.len(),
        kept.len(),
    );
    Ok(kept.into_iter().map(|rec| table.id(rec)).collect())
}
