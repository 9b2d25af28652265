//! Normalised seamark records and their construction invariants.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::codes::{Category, Colour, ColourPattern, MarkSystem, SeamarkKind};
use crate::coordinate::Coordinate;

/// Untyped key/value object exactly as read from a source document.
///
/// Records are never mutated once read; normalised records keep a copy as a
/// back-reference for debugging and post-hoc validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Wrap a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Data source a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Crowd-sourced OpenStreetMap node.
    Osm,
    /// National hydrographic (SHOM) survey export.
    Shom,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Osm => "osm",
            Self::Shom => "shom",
        })
    }
}

/// Kind of external identifier used to correlate records across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossReference {
    /// National beacon registry number (`ref:aladin`).
    Registry,
    /// Link to the hydrographic source record (`ref:inspire`).
    Inspire,
}

/// A required field was missing, malformed or inconsistent.
///
/// Fatal for the one record being built; loaders collect these per record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is absent.
    #[error("missing required field `{field}`")]
    Missing {
        /// Field name in source terms.
        field: String,
    },
    /// The field is present but cannot be decoded.
    #[error("field `{field}` has malformed value {value:?}: {reason}")]
    Malformed {
        /// Field name in source terms.
        field: String,
        /// Offending raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The field conflicts with another field of the same record.
    #[error("field `{field}` is inconsistent: {reason}")]
    Inconsistent {
        /// Field name in source terms.
        field: String,
        /// Description of the conflict.
        reason: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Missing`].
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::Malformed`].
    pub fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ValidationError::Inconsistent`].
    pub fn inconsistent(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Inconsistent {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::Malformed { field, .. }
            | Self::Inconsistent { field, .. } => field,
        }
    }
}

/// Decoded fields handed to [`SeamarkRecord::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordParts {
    /// Source-specific identifier.
    pub id: String,
    /// Where the record came from.
    pub source: Source,
    /// Position of the mark.
    pub coordinate: Coordinate,
    /// Seamark type.
    pub kind: SeamarkKind,
    /// Category; required for hydrographic cardinal kinds.
    pub category: Option<Category>,
    /// Height in metres.
    pub height: Option<f64>,
    /// Colours from top to bottom; empty when unknown.
    pub colours: Vec<Colour>,
    /// Colour band arrangement.
    pub colour_pattern: Option<ColourPattern>,
    /// National beacon registry number.
    pub registry_ref: Option<String>,
    /// Link to the hydrographic source record.
    pub inspire_ref: Option<String>,
    /// Back-reference to the source object.
    pub raw: RawRecord,
}

impl RecordParts {
    /// Start from the required fields, leaving every optional attribute empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source: Source,
        coordinate: Coordinate,
        kind: SeamarkKind,
        raw: RawRecord,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            coordinate,
            kind,
            category: None,
            height: None,
            colours: Vec::new(),
            colour_pattern: None,
            registry_ref: None,
            inspire_ref: None,
            raw,
        }
    }
}

/// A normalised, immutable seamark.
///
/// # Examples
/// ```
/// use seamark_core::{
///     CardinalDirection, Category, Coordinate, RawRecord, RecordParts, SeamarkKind,
///     SeamarkRecord, Source,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut parts = RecordParts::new(
///     "FR123456789012345",
///     Source::Shom,
///     Coordinate::new(48.8, -3.5)?,
///     SeamarkKind::from_tag("beacon_cardinal"),
///     RawRecord::default(),
/// );
/// parts.category = Some(Category::Cardinal(CardinalDirection::North));
/// let record = SeamarkRecord::new(parts)?;
/// assert_eq!(record.category().map(|c| c.as_osm()), Some("north"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeamarkRecord {
    parts: RecordParts,
}

impl SeamarkRecord {
    /// Validates kind/category coherence and attribute ranges.
    pub fn new(parts: RecordParts) -> Result<Self, ValidationError> {
        if parts.id.trim().is_empty() {
            return Err(ValidationError::missing("id"));
        }
        check_category(parts.source, &parts.kind, parts.category)?;
        if let Some(height) = parts.height
            && (!height.is_finite() || height < 0.0)
        {
            return Err(ValidationError::malformed(
                "height",
                height.to_string(),
                "height must be a finite, non-negative number of metres",
            ));
        }
        Ok(Self { parts })
    }

    /// Source-specific identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.parts.id
    }

    /// Where the record came from.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.parts.source
    }

    /// Position of the mark.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.parts.coordinate
    }

    /// Seamark type.
    #[must_use]
    pub const fn kind(&self) -> &SeamarkKind {
        &self.parts.kind
    }

    /// Category, when the kind has one.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.parts.category
    }

    /// Height in metres.
    #[must_use]
    pub const fn height(&self) -> Option<f64> {
        self.parts.height
    }

    /// Colours from top to bottom.
    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.parts.colours
    }

    /// Colour band arrangement.
    #[must_use]
    pub const fn colour_pattern(&self) -> Option<ColourPattern> {
        self.parts.colour_pattern
    }

    /// Cross-reference of the requested kind.
    #[must_use]
    pub fn reference(&self, kind: CrossReference) -> Option<&str> {
        match kind {
            CrossReference::Registry => self.parts.registry_ref.as_deref(),
            CrossReference::Inspire => self.parts.inspire_ref.as_deref(),
        }
    }

    /// Back-reference to the source object.
    #[must_use]
    pub const fn raw(&self) -> &RawRecord {
        &self.parts.raw
    }

    /// Geodesic distance in metres to `other`.
    #[must_use]
    pub fn distance_to(&self, other: Coordinate) -> f64 {
        self.parts.coordinate.distance_to(other)
    }
}

// Hydrographic cardinal marks always carry CATCAM; crowd-sourced ones may not.
fn check_category(
    source: Source,
    kind: &SeamarkKind,
    category: Option<Category>,
) -> Result<(), ValidationError> {
    match (kind.system(), category) {
        (Some(MarkSystem::Cardinal), None) if source == Source::Shom => {
            Err(ValidationError::missing("category"))
        }
        (Some(system), Some(found)) if found.system() != system => {
            Err(ValidationError::inconsistent(
                "category",
                format!("{found} is not a valid category for {kind}"),
            ))
        }
        (None, Some(found)) => Err(ValidationError::inconsistent(
            "category",
            format!("{kind} does not take a category, found {found}"),
        )),
        _ => Ok(()),
    }
}
