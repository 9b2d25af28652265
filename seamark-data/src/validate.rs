//! Post-hoc coherence checks on normalised records.

use seamark_core::{Diagnostic, SeamarkRecord, Source};
use serde_json::Value;

use crate::description::Description;
use crate::normalise::{cardinal_beacon_checks, description_checks};

/// Re-check a record against the rules of its source.
///
/// Hydrographic records have their raw description re-parsed and run
/// through the `BCNCAR`/`CATCAM`/`COLOUR` checks. Crowd-sourced cardinal
/// beacons have their raw tags re-checked for colour and shape. The record
/// is never modified or rejected.
#[must_use]
pub fn validate(record: &SeamarkRecord) -> Vec<Diagnostic> {
    let raw = record.raw();
    match record.source() {
        Source::Shom => raw
            .get("gml:description")
            .and_then(Value::as_str)
            .map(|text| description_checks(record.id(), &Description::parse(text)))
            .unwrap_or_default(),
        Source::Osm if record.kind().tag() == "beacon_cardinal" => raw
            .get("tags")
            .and_then(Value::as_object)
            .map(|tags| cardinal_beacon_checks(record.id(), tags))
            .unwrap_or_default(),
        Source::Osm => Vec::new(),
    }
}
