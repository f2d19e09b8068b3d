use std::fmt;

use geo::{Coord, Geometry};
use serde::{Deserialize, Serialize};

use crate::error::DissolveError;
use crate::record::RecordId;

/// The geometry kinds the engine dissolves.
///
/// The external decoder is responsible for producing tagged `geo` geometries;
/// the engine only classifies them into these three comparison shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// A single vertex per record.
    Point,
    /// An ordered vertex sequence from a (multi-)linestring.
    Line,
    /// An ordered vertex sequence from all rings of a (multi-)polygon.
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "point"),
            Self::Line => write!(f, "line"),
            Self::Polygon => write!(f, "polygon"),
        }
    }
}

/// Flat coordinate storage for one dissolve call.
///
/// All vertices live in a single `Vec<Coord>`; `offsets` is a CSR-style index
/// (length N+1) giving each record's span.  Built once from the caller's
/// geometries — the caller's data is never touched — with multi-vertex spans
/// sorted ascending by x (each `Coord` moves as a unit, so x/y stay paired).
#[derive(Clone, Debug)]
pub struct VertexArena {
    kind: GeometryKind,
    coords: Vec<Coord<f64>>,
    /// CSR row offsets; `offsets[r]..offsets[r + 1]` spans record `r`.
    offsets: Vec<usize>,
}

impl VertexArena {
    /// Build an arena from decoded geometries, validating that every record
    /// has the same kind, at least one vertex, and finite coordinates.
    ///
    /// Must be called with a non-empty slice; the kind is taken from the
    /// first record.
    pub fn from_geometries(records: &[(RecordId, Geometry<f64>)]) -> Result<Self, DissolveError> {
        debug_assert!(!records.is_empty(), "arena requires at least one record");

        let mut coords = Vec::new();
        let mut offsets = Vec::with_capacity(records.len() + 1);
        offsets.push(0);

        let mut kind = None;
        for (id, geometry) in records {
            let got = classify(*id, geometry, &mut coords)?;
            let expected = *kind.get_or_insert(got);
            if got != expected {
                return Err(DissolveError::MixedGeometryKinds { record: *id, expected, got });
            }
            if coords.len() == *offsets.last().unwrap() {
                return Err(DissolveError::EmptyGeometry(*id));
            }
            if coords[*offsets.last().unwrap()..]
                .iter()
                .any(|c| !c.x.is_finite() || !c.y.is_finite())
            {
                return Err(DissolveError::NonFiniteCoordinate(*id));
            }
            offsets.push(coords.len());
        }
        let kind = kind.unwrap();

        // Vertex comparison is index-aligned after an x-sort within each
        // record, so equal shapes line up regardless of ring start vertex.
        if kind != GeometryKind::Point {
            for r in 0..records.len() {
                coords[offsets[r]..offsets[r + 1]].sort_by(|a, b| a.x.total_cmp(&b.x));
            }
        }

        Ok(Self { kind, coords, offsets })
    }

    /// The common kind of every record in this arena.
    #[inline] pub fn kind(&self) -> GeometryKind { self.kind }

    /// Number of records.
    #[inline] pub fn len(&self) -> usize { self.offsets.len() - 1 }

    /// Whether the arena holds no records.
    #[inline] pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The (x-sorted, for multi-vertex kinds) vertex span of record `rec`.
    #[inline]
    pub fn vertices(&self, rec: usize) -> &[Coord<f64>] {
        &self.coords[self.offsets[rec]..self.offsets[rec + 1]]
    }
}

/// Append `geometry`'s vertices to `out` and report its comparison kind.
fn classify(
    id: RecordId,
    geometry: &Geometry<f64>,
    out: &mut Vec<Coord<f64>>,
) -> Result<GeometryKind, DissolveError> {
    match geometry {
        Geometry::Point(p) => {
            out.push(p.0);
            Ok(GeometryKind::Point)
        }
        Geometry::LineString(ls) => {
            out.extend_from_slice(&ls.0);
            Ok(GeometryKind::Line)
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                out.extend_from_slice(&ls.0);
            }
            Ok(GeometryKind::Line)
        }
        Geometry::Polygon(p) => {
            push_polygon(p, out);
            Ok(GeometryKind::Polygon)
        }
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                push_polygon(p, out);
            }
            Ok(GeometryKind::Polygon)
        }
        other => Err(DissolveError::UnsupportedGeometry { record: id, found: variant_name(other) }),
    }
}

/// All ring vertices of a polygon (exterior first, then holes).
fn push_polygon(polygon: &geo::Polygon<f64>, out: &mut Vec<Coord<f64>>) {
    out.extend_from_slice(&polygon.exterior().0);
    for hole in polygon.interiors() {
        out.extend_from_slice(&hole.0);
    }
}

fn variant_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
