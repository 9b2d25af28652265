//! Conversion of raw source records into validated [`SeamarkRecord`]s.
//!
//! Each source has its own normaliser but both follow one contract: every
//! required field is present and well-formed or construction fails with a
//! [`ValidationError`] naming the field. Findings that do not invalidate the
//! record are returned as [`Diagnostic`]s next to it.

mod osm;
mod shom;

use seamark_core::{Diagnostic, SeamarkRecord, ValidationError};
use serde_json::Value;

pub use osm::{cardinal_beacon_checks, normalise_osm, osm_record_id};
pub use shom::{INSPIRE_URL_PREFIX, description_checks, normalise_shom, shom_record_id};

/// A record together with the non-fatal findings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalised {
    /// The validated record.
    pub record: SeamarkRecord,
    /// Findings that did not prevent construction.
    pub diagnostics: Vec<Diagnostic>,
}

/// Render a scalar JSON value as an identifier string.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Read a required numeric field.
fn required_f64(value: Option<&Value>, field: &str) -> Result<f64, ValidationError> {
    let present = value.ok_or_else(|| ValidationError::missing(field))?;
    present
        .as_f64()
        .ok_or_else(|| ValidationError::malformed(field, present.to_string(), "expected a number"))
}
