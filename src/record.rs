use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::DissolveError;

/// Identifies a single record (feature OID, row id, etc.) within one dissolve
/// call.  Ids are opaque to the engine; they are carried through the sort
/// permutations and returned in the keep set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId(id)
    }
}

/// Ids of the records surviving a dissolve — one representative per detected
/// cluster plus every singleton.
pub type KeepSet = AHashSet<RecordId>;

/// Flat row-major table of numeric attribute values, one row per record.
///
/// The final dimension is the *primary* dimension: its tolerance bounds the
/// candidate comparison window during the attribute dissolve.  Rows are
/// validated on insertion (dimension count, finiteness), so the scan itself
/// never re-checks values.
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    ids: Vec<RecordId>,
    /// Row-major values; record `r`, dimension `d` lives at `r * dims + d`.
    values: Vec<f64>,
    dims: usize,
}

impl AttributeTable {
    /// Create an empty table with `dims` attribute dimensions per record.
    ///
    /// Panics if `dims` is zero; an attribute dissolve needs at least the
    /// primary dimension (a caller with no fields wants the geometry path).
    pub fn new(dims: usize) -> Self {
        assert!(dims >= 1, "attribute table needs at least one dimension");
        Self { ids: Vec::new(), values: Vec::new(), dims }
    }

    /// Append one record row.  Fails if the row length differs from the
    /// table's dimension count or any value is non-finite.
    pub fn push_record(&mut self, id: RecordId, row: &[f64]) -> Result<(), DissolveError> {
        if row.len() != self.dims {
            return Err(DissolveError::DimensionMismatch {
                record: id,
                expected: self.dims,
                got: row.len(),
            });
        }
        if let Some(dim) = row.iter().position(|v| !v.is_finite()) {
            return Err(DissolveError::NonFiniteValue { record: id, dim });
        }
        self.ids.push(id);
        self.values.extend_from_slice(row);
        Ok(())
    }

    /// Build a table from `(id, row)` pairs.  The dimension count is taken
    /// from the first row; every later row must match it.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, DissolveError>
    where
        I: IntoIterator<Item = (RecordId, R)>,
        R: AsRef<[f64]>,
    {
        let mut rows = rows.into_iter();
        let Some((id, first)) = rows.next() else {
            return Ok(Self::new(1));
        };
        let mut table = Self::new(first.as_ref().len().max(1));
        table.push_record(id, first.as_ref())?;
        for (id, row) in rows {
            table.push_record(id, row.as_ref())?;
        }
        Ok(table)
    }

    /// Number of records.
    #[inline] pub fn len(&self) -> usize { self.ids.len() }

    /// Whether the table holds no records.
    #[inline] pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Number of attribute dimensions per record.
    #[inline] pub fn dims(&self) -> usize { self.dims }

    /// Id of record `rec`.
    #[inline] pub fn id(&self, rec: usize) -> RecordId { self.ids[rec] }

    /// Value of record `rec` in dimension `dim`.
    #[inline]
    pub fn value(&self, rec: usize, dim: usize) -> f64 {
        self.values[rec * self.dims + dim]
    }

    /// The full row of record `rec`.
    #[inline]
    pub fn row(&self, rec: usize) -> &[f64] {
        &self.values[rec * self.dims..(rec + 1) * self.dims]
    }
}
