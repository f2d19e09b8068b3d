//! Shared scan template: sort by one scalar, then run a greedy forward-only
//! pass in which each record is judged against the records after it, and the
//! final record is kept unconditionally (nothing follows it, so the scan can
//! never show it redundant).
//!
//! Both the attribute and the geometry dissolve are thin configurations of
//! these helpers; the caller supplies the sort key and the window/duplicate
//! predicates.  All state lives in the permutation and the closures — the
//! caller's arrays are never reordered.

/// Stable permutation of `0..keys.len()` ordered by ascending key.
///
/// Ties keep input order, so id association and re-runs are deterministic.
pub(crate) fn sort_order(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    order
}

/// Greedy forward scan over a precomputed ordering.
///
/// `survives(pos)` judges the record at sorted position `pos` against the
/// positions after it; the last position is never judged.  Returns the kept
/// original indices in scan order.
pub(crate) fn forward_scan<F>(order: &[usize], mut survives: F) -> Vec<usize>
where
    F: FnMut(usize) -> bool,
{
    let Some((&last, rest)) = order.split_last() else {
        return Vec::new();
    };
    let mut kept = Vec::new();
    for pos in 0..rest.len() {
        if survives(pos) {
            kept.push(order[pos]);
        }
    }
    kept.push(last);
    kept
}

/// One past the last sorted position still inside the anchor's window.
///
/// Walks forward from `pos + 1` while `within(anchor, candidate)` holds for
/// the original indices; stops at the first failing position or the end of
/// the ordering.  The window is contiguous because the ordering is sorted by
/// the same scalar the predicate bounds.
pub(crate) fn window_end<W>(order: &[usize], pos: usize, within: W) -> usize
where
    W: Fn(usize, usize) -> bool,
{
    let anchor = order[pos];
    let mut end = pos + 1;
    while end < order.len() && within(anchor, order[end]) {
        end += 1;
    }
    end
}
