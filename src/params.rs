//! Run parameters and the thin dispatch between the two comparison spaces.
//!
//! Mode selection mirrors the source tool: an empty field list means the
//! records are compared by geometry, a non-empty one means they are compared
//! by the named attribute fields (the last field is the primary dimension).

use geo::Geometry;
use serde::{Deserialize, Serialize};

use crate::attribute::dissolve_attributes;
use crate::error::DissolveError;
use crate::record::{AttributeTable, KeepSet, RecordId};
use crate::spatial::dissolve_geometries;

/// Which comparison space a set of parameters selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DissolveMode {
    Attributes,
    Geometry,
}

/// Parameters for one dissolve run, typically deserialized from a config
/// file or tool invocation.
///
/// `fields` names the attribute dimensions in comparison order (last =
/// primary); leaving it empty selects the geometry path.  `tolerances` holds
/// one value per field, or exactly one value for geometry mode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DissolveParams {
    #[serde(default)]
    pub fields: Vec<String>,
    pub tolerances: Vec<f64>,
}

impl DissolveParams {
    /// The comparison space these parameters select.
    pub fn mode(&self) -> DissolveMode {
        if self.fields.is_empty() {
            DissolveMode::Geometry
        } else {
            DissolveMode::Attributes
        }
    }

    /// Check tolerance count and sign against the selected mode.
    pub fn validate(&self) -> Result<(), DissolveError> {
        let expected = match self.mode() {
            DissolveMode::Attributes => self.fields.len(),
            DissolveMode::Geometry => 1,
        };
        if self.tolerances.len() != expected {
            return Err(DissolveError::ToleranceCountMismatch {
                expected,
                got: self.tolerances.len(),
            });
        }
        if let Some(&t) = self.tolerances.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(DissolveError::InvalidTolerance(t));
        }
        Ok(())
    }
}

/// The record data for one dissolve run, matching one of the two modes.
#[derive(Debug)]
pub enum DissolveInput<'a> {
    Attributes(&'a AttributeTable),
    Geometry(&'a [(RecordId, Geometry<f64>)]),
}

/// Validate `params` and dispatch to the matching clusterer.
pub fn dissolve(input: DissolveInput<'_>, params: &DissolveParams) -> Result<KeepSet, DissolveError> {
    params.validate()?;
    match (params.mode(), input) {
        (DissolveMode::Attributes, DissolveInput::Attributes(table)) => {
            dissolve_attributes(table, &params.tolerances)
        }
        (DissolveMode::Geometry, DissolveInput::Geometry(records)) => {
            dissolve_geometries(records, params.tolerances[0])
        }
        _ => Err(DissolveError::InputMismatch),
    }
}
