use std::error::Error;
use std::fmt;

use crate::geometry::GeometryKind;
use crate::record::RecordId;

/// Errors produced by input validation before any scanning starts.
///
/// Every variant is an invalid-input failure: the engine either returns a
/// complete keep set or one of these, never a partial result.  An empty
/// record set is not an error — it dissolves to an empty keep set.
#[derive(Debug, Clone, PartialEq)]
pub enum DissolveError {
    /// A record row has the wrong number of attribute values.
    DimensionMismatch { record: RecordId, expected: usize, got: usize },
    /// The tolerance vector length does not match the dimension count
    /// (attribute mode) or is not exactly one (geometry mode).
    ToleranceCountMismatch { expected: usize, got: usize },
    /// A tolerance is negative or non-finite.
    InvalidTolerance(f64),
    /// An attribute value is NaN or infinite.
    NonFiniteValue { record: RecordId, dim: usize },
    /// A record's geometry kind differs from the first record's kind.
    MixedGeometryKinds { record: RecordId, expected: GeometryKind, got: GeometryKind },
    /// A geometry variant the engine does not dissolve (points, lines, and
    /// polygons only).
    UnsupportedGeometry { record: RecordId, found: &'static str },
    /// A geometry decoded to zero vertices.
    EmptyGeometry(RecordId),
    /// A vertex coordinate is NaN or infinite.
    NonFiniteCoordinate(RecordId),
    /// The dispatch input does not match the mode implied by the parameters.
    InputMismatch,
}

impl fmt::Display for DissolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { record, expected, got } => {
                write!(f, "record {record} has {got} attribute values, expected {expected}")
            }
            Self::ToleranceCountMismatch { expected, got } => {
                write!(f, "expected {expected} tolerance value(s), got {got}")
            }
            Self::InvalidTolerance(t) => {
                write!(f, "tolerance {t} is not a non-negative finite number")
            }
            Self::NonFiniteValue { record, dim } => {
                write!(f, "record {record} has a non-finite value in dimension {dim}")
            }
            Self::MixedGeometryKinds { record, expected, got } => {
                write!(f, "record {record} is a {got} but the collection started with a {expected}")
            }
            Self::UnsupportedGeometry { record, found } => {
                write!(f, "record {record} has unsupported geometry type {found}")
            }
            Self::EmptyGeometry(record) => {
                write!(f, "record {record} has a geometry with no vertices")
            }
            Self::NonFiniteCoordinate(record) => {
                write!(f, "record {record} has a non-finite vertex coordinate")
            }
            Self::InputMismatch => {
                write!(f, "input records do not match the dissolve mode implied by the parameters")
            }
        }
    }
}

impl Error for DissolveError {}
