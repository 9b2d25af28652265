//! OpenStreetMap-style export of normalised records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codes::join_colours;
use crate::record::{CrossReference, SeamarkRecord};

/// Tag holding the seamark type, e.g. `beacon_cardinal`.
pub const TAG_SEAMARK_TYPE: &str = "seamark:type";
/// Tag holding the national beacon registry number.
pub const TAG_REF_ALADIN: &str = "ref:aladin";
/// Tag linking back to the hydrographic source record.
pub const TAG_REF_INSPIRE: &str = "ref:inspire";

/// Build the key of a per-type attribute, e.g.
/// `seamark:beacon_cardinal:category`.
///
/// # Examples
/// ```
/// use seamark_core::attribute_key;
///
/// assert_eq!(
///     attribute_key("buoy_lateral", "colour"),
///     "seamark:buoy_lateral:colour"
/// );
/// ```
#[must_use]
pub fn attribute_key(type_tag: &str, attribute: &str) -> String {
    format!("seamark:{type_tag}:{attribute}")
}

/// A node in the OpenStreetMap JSON tagging convention.
///
/// Tags are kept in an ordered map, so identical records serialise to
/// identical documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    /// Element type, always `node`.
    #[serde(rename = "type")]
    pub element: String,
    /// OpenStreetMap node id, when the caller supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Seamark tags.
    pub tags: BTreeMap<String, String>,
}

impl SeamarkRecord {
    /// Render the record as an OpenStreetMap node.
    ///
    /// # Examples
    /// ```
    /// use seamark_core::{Coordinate, RawRecord, RecordParts, SeamarkKind, SeamarkRecord, Source};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let parts = RecordParts::new(
    ///     "1",
    ///     Source::Osm,
    ///     Coordinate::new(48.8, -3.5)?,
    ///     SeamarkKind::from_tag("light_minor"),
    ///     RawRecord::default(),
    /// );
    /// let node = SeamarkRecord::new(parts)?.export(Some(1));
    /// assert_eq!(node.element, "node");
    /// assert_eq!(node.tags.get("seamark:type").map(String::as_str), Some("light_minor"));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn export(&self, osm_id: Option<i64>) -> ExportNode {
        let type_tag = self.kind().tag();
        let mut tags = BTreeMap::new();
        tags.insert(TAG_SEAMARK_TYPE.to_owned(), type_tag.to_owned());

        if let Some(category) = self.category() {
            tags.insert(
                attribute_key(type_tag, "category"),
                category.as_osm().to_owned(),
            );
        }
        if let Some(height) = self.height() {
            tags.insert(attribute_key(type_tag, "height"), height.to_string());
        }
        if !self.colours().is_empty() {
            tags.insert(
                attribute_key(type_tag, "colour"),
                join_colours(self.colours()),
            );
        }
        if let Some(pattern) = self.colour_pattern() {
            tags.insert(
                attribute_key(type_tag, "colour_pattern"),
                pattern.as_osm().to_owned(),
            );
        }
        if let Some(registry) = self.reference(CrossReference::Registry) {
            tags.insert(TAG_REF_ALADIN.to_owned(), registry.to_owned());
        }
        if let Some(inspire) = self.reference(CrossReference::Inspire) {
            tags.insert(TAG_REF_INSPIRE.to_owned(), inspire.to_owned());
        }

        let coordinate = self.coordinate();
        ExportNode {
            element: "node".to_owned(),
            id: osm_id,
            lat: coordinate.lat(),
            lon: coordinate.lon(),
            tags,
        }
    }
}
