use anyhow::Result;
use geodissolve::{dissolve_attributes, AttributeTable, DissolveError, RecordId};

fn table(rows: &[(i64, &[f64])]) -> AttributeTable {
    AttributeTable::from_rows(rows.iter().map(|&(id, row)| (RecordId(id), row))).unwrap()
}

/// Two records within tolerance on both dimensions cluster; the later one in
/// primary order is kept.  A distinct third record survives.
#[test]
fn near_duplicates_cluster_and_later_record_wins() -> Result<()> {
    let table = table(&[
        (1, &[10.0, 100.0]),
        (2, &[10.2, 100.1]),
        (3, &[50.0, 500.0]),
    ]);
    let kept = dissolve_attributes(&table, &[0.5, 1.0])?;

    assert_eq!(kept.len(), 2);
    assert!(kept.contains(&RecordId(2)));
    assert!(kept.contains(&RecordId(3)));
    Ok(())
}

#[test]
fn empty_input_is_not_an_error() -> Result<()> {
    let kept = dissolve_attributes(&AttributeTable::new(2), &[0.5, 1.0])?;
    assert!(kept.is_empty());
    Ok(())
}

#[test]
fn wrong_tolerance_length_fails_before_scanning() {
    let table = table(&[(1, &[10.0, 100.0])]);
    let err = dissolve_attributes(&table, &[0.5, 1.0, 2.0]).unwrap_err();
    assert_eq!(err, DissolveError::ToleranceCountMismatch { expected: 2, got: 3 });
}

/// The record with the largest primary value can never be shown redundant by
/// the forward-only scan, so it is always in the result.
#[test]
fn largest_primary_value_is_always_kept() -> Result<()> {
    let table = table(&[
        (10, &[1.0, 7.0]),
        (11, &[1.0, 7.0]),
        (12, &[1.0, 7.0]),
    ]);
    let kept = dissolve_attributes(&table, &[0.5, 1.0])?;

    // All three are identical: only the final record in sort order survives.
    assert_eq!(kept.len(), 1);
    assert!(kept.contains(&RecordId(12)));
    Ok(())
}

/// A record farther than tolerance from every other record on every
/// dimension is always kept.
#[test]
fn unique_records_all_survive() -> Result<()> {
    let table = table(&[
        (1, &[0.0, 0.0]),
        (2, &[10.0, 10.0]),
        (3, &[20.0, 20.0]),
        (4, &[30.0, 30.0]),
    ]);
    let kept = dissolve_attributes(&table, &[1.0, 1.0])?;
    assert_eq!(kept.len(), 4);
    Ok(())
}

/// Dissolving the kept subset again with the same tolerances changes nothing.
#[test]
fn dissolve_is_idempotent() -> Result<()> {
    let rows: Vec<(i64, Vec<f64>)> = vec![
        (1, vec![10.0, 100.0]),
        (2, vec![10.2, 100.1]),
        (3, vec![10.4, 100.2]),
        (4, vec![50.0, 500.0]),
        (5, vec![50.1, 500.5]),
    ];
    let tolerances = [0.5, 1.0];

    let first = AttributeTable::from_rows(rows.iter().map(|(id, r)| (RecordId(*id), r.clone())))?;
    let kept = dissolve_attributes(&first, &tolerances)?;

    let survivors = AttributeTable::from_rows(
        rows.iter()
            .filter(|(id, _)| kept.contains(&RecordId(*id)))
            .map(|(id, r)| (RecordId(*id), r.clone())),
    )?;
    let kept_again = dissolve_attributes(&survivors, &tolerances)?;

    assert_eq!(kept, kept_again);
    Ok(())
}
