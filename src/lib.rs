//! Tolerance-based feature dissolve.
//!
//! Given a set of records — each a unique key plus either a tuple of numeric
//! attribute values or a decoded planar geometry — the engine decides which
//! records are near-duplicates of an earlier-kept record within per-dimension
//! error tolerances, and returns the subset of keys to retain (one
//! representative per detected cluster).
//!
//! Both comparison spaces run the same greedy strategy: sort by one scalar,
//! bound a forward-only candidate window by that scalar's tolerance, then
//! confirm or deny duplication with secondary comparisons (remaining attribute
//! dimensions, or Euclidean distance between index-aligned vertices).  The
//! scan is order-dependent by design; see `scan` for the shared template.
//!
//! Reading records from a backing store, decoding geometry encodings, and
//! writing the retained set back are the caller's concern.  The engine takes
//! in-memory data, mutates nothing, and holds no state across calls.

pub mod attribute;
pub mod error;
pub mod geometry;
pub mod params;
pub mod record;
pub mod spatial;

mod scan;

pub use attribute::dissolve_attributes;
pub use error::DissolveError;
pub use geometry::{GeometryKind, VertexArena};
pub use params::{dissolve, DissolveInput, DissolveMode, DissolveParams};
pub use record::{AttributeTable, KeepSet, RecordId};
pub use spatial::dissolve_geometries;
