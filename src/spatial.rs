//! Geometry-space dissolve.
//!
//! Point records sort by x and reuse the shared windowed scan with a
//! Euclidean distance check.  Line and polygon records keep their input
//! order; each vertex index is scanned forward independently against the
//! same vertex index of later records, and a record survives only if some
//! vertex index is never matched within tolerance.

use geo::{Coord, Geometry};
use log::{debug, trace};

use crate::error::DissolveError;
use crate::geometry::{GeometryKind, VertexArena};
use crate::record::{KeepSet, RecordId};
use crate::scan::{forward_scan, sort_order, window_end};

/// Dissolve records by their decoded geometry.
///
/// All records must share one geometry kind; `tolerance` is a single
/// non-negative finite distance applied both as the x window bound and as
/// the Euclidean duplicate threshold.  Returns the ids to retain.  An empty
/// slice dissolves to an empty set.
pub fn dissolve_geometries(
    records: &[(RecordId, Geometry<f64>)],
    tolerance: f64,
) -> Result<KeepSet, DissolveError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(DissolveError::InvalidTolerance(tolerance));
    }
    if records.is_empty() {
        return Ok(KeepSet::default());
    }

    let arena = VertexArena::from_geometries(records)?;
    let kept = match arena.kind() {
        GeometryKind::Point => dissolve_points(&arena, tolerance),
        GeometryKind::Line | GeometryKind::Polygon => dissolve_vertex_lists(&arena, tolerance),
    };

    debug!(
        "geometry dissolve ({}): {} record(s), kept {}",
        arena.kind(),
        arena.len(),
        kept.len(),
    );
    Ok(kept.into_iter().map(|rec| records[rec].0).collect())
}

/// Single-vertex path: sort by x, window by x delta, confirm by distance.
fn dissolve_points(arena: &VertexArena, tolerance: f64) -> Vec<usize> {
    let keys: Vec<f64> = (0..arena.len()).map(|r| arena.vertices(r)[0].x).collect();
    let order = sort_order(&keys);

    forward_scan(&order, |pos| {
        let end = window_end(&order, pos, |i, k| keys[k] - keys[i] < tolerance);
        let a = arena.vertices(order[pos])[0];
        let duplicated = order[pos + 1..end]
            .iter()
            .any(|&k| distance(a, arena.vertices(k)[0]) < tolerance);
        if duplicated {
            trace!("dropping point record at index {}", order[pos]);
        }
        !duplicated
    })
}

/// Multi-vertex path: input order, per-vertex forward scans.
///
/// Vertex `j` of the anchor is compared against vertex `j` of each later
/// record.  A later record with fewer than `j + 1` vertices ends the scan
/// for that vertex, as does the first x difference at or beyond tolerance.
fn dissolve_vertex_lists(arena: &VertexArena, tolerance: f64) -> Vec<usize> {
    let order: Vec<usize> = (0..arena.len()).collect();
    let mut duplicated: Vec<bool> = Vec::new(); // reused across records

    forward_scan(&order, |rec| {
        let vertices = arena.vertices(rec);
        duplicated.clear();
        duplicated.resize(vertices.len(), false);

        for (j, &a) in vertices.iter().enumerate() {
            for other in rec + 1..arena.len() {
                let Some(&b) = arena.vertices(other).get(j) else {
                    break; // shorter record: no vertex j to compare
                };
                if (a.x - b.x).abs() >= tolerance {
                    break;
                }
                if distance(a, b) < tolerance {
                    duplicated[j] = true;
                }
            }
        }

        let keep = duplicated.iter().any(|&d| !d);
        if !keep {
            trace!(
                "dropping {} record at index {rec}: all {} vertices duplicated",
                arena.kind(),
                vertices.len(),
            );
        }
        keep
    })
}

#[inline]
fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
