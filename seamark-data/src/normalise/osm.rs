//! Normaliser for crowd-sourced OpenStreetMap nodes.

use seamark_core::{
    Category, Colour, ColourPattern, Coordinate, CoordinateError, Diagnostic, DiagnosticKind,
    MarkSystem, RawRecord, RecordParts, SeamarkKind, SeamarkRecord, Source, TAG_REF_ALADIN,
    TAG_REF_INSPIRE, TAG_SEAMARK_TYPE, ValidationError, attribute_key,
};
use serde_json::{Map, Value};

use super::{Normalised, required_f64, scalar_to_string};

const CARDINAL_BEACON: &str = "beacon_cardinal";

/// Colour values accepted on a cardinal beacon.
const CARDINAL_BEACON_COLOURS: [&str; 4] = [
    "yellow;black",
    "yellow;black;yellow",
    "black;yellow",
    "black;yellow;black",
];

type Tags = Map<String, Value>;

/// Identifier of a raw node, if it has a usable one.
#[must_use]
pub fn osm_record_id(raw: &RawRecord) -> Option<String> {
    raw.get("id").and_then(scalar_to_string)
}

/// Normalise an OpenStreetMap node dictionary.
///
/// Requires `id`, `lat`, `lon` and a `tags` object holding `seamark:type`.
/// Cardinal beacons also require `seamark:beacon_cardinal:category`; a
/// cardinal buoy without one is kept with a warning.
///
/// # Examples
/// ```
/// use seamark_core::RawRecord;
/// use seamark_data::normalise_osm;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let raw = RawRecord::from_value(serde_json::json!({
///     "id": 4242, "lat": 48.81, "lon": -3.57,
///     "tags": {
///         "seamark:type": "beacon_cardinal",
///         "seamark:beacon_cardinal:category": "west",
///         "seamark:beacon_cardinal:colour": "yellow;black;yellow",
///         "seamark:beacon_cardinal:shape": "pole"
///     }
/// }))
/// .ok_or("not an object")?;
/// let normalised = normalise_osm(raw)?;
/// assert_eq!(normalised.record.category().map(|c| c.as_osm()), Some("west"));
/// assert!(normalised.diagnostics.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn normalise_osm(raw: RawRecord) -> Result<Normalised, ValidationError> {
    let id_value = raw.get("id").ok_or_else(|| ValidationError::missing("id"))?;
    let id = scalar_to_string(id_value).ok_or_else(|| {
        ValidationError::malformed("id", id_value.to_string(), "expected a number or string")
    })?;
    let lat = required_f64(raw.get("lat"), "lat")?;
    let lon = required_f64(raw.get("lon"), "lon")?;
    let coordinate = Coordinate::new(lat, lon).map_err(coordinate_error)?;

    let tags_value = raw
        .get("tags")
        .ok_or_else(|| ValidationError::missing("tags"))?;
    let tags = tags_value.as_object().ok_or_else(|| {
        ValidationError::malformed("tags", tags_value.to_string(), "expected an object")
    })?;
    let kind = SeamarkKind::from_tag(required_tag(tags, TAG_SEAMARK_TYPE)?);

    let mut diagnostics = Vec::new();
    let category = read_category(&id, tags, &kind, &mut diagnostics)?;
    let type_tag = kind.tag();
    let height = read_height(&id, tags, type_tag, &mut diagnostics);
    let colours = read_colours(&id, tags, type_tag, &mut diagnostics);
    let colour_pattern = read_colour_pattern(&id, tags, type_tag, &mut diagnostics);
    if type_tag == CARDINAL_BEACON {
        diagnostics.extend(cardinal_beacon_checks(&id, tags));
    }
    let registry_ref = optional_tag(tags, TAG_REF_ALADIN).map(str::to_owned);
    let inspire_ref = optional_tag(tags, TAG_REF_INSPIRE).map(str::to_owned);

    let mut parts = RecordParts::new(id, Source::Osm, coordinate, kind, raw);
    parts.category = category;
    parts.height = height;
    parts.colours = colours;
    parts.colour_pattern = colour_pattern;
    parts.registry_ref = registry_ref;
    parts.inspire_ref = inspire_ref;

    Ok(Normalised {
        record: SeamarkRecord::new(parts)?,
        diagnostics,
    })
}

/// Checks recommended tags on a cardinal beacon.
///
/// A missing colour or shape, or a colour outside the four cardinal
/// schemes, is reported but never rejects the node.
#[must_use]
pub fn cardinal_beacon_checks(id: &str, tags: &Map<String, Value>) -> Vec<Diagnostic> {
    let colour_key = attribute_key(CARDINAL_BEACON, "colour");
    let shape_key = attribute_key(CARDINAL_BEACON, "shape");
    let mut diagnostics = Vec::new();

    match tags.get(&colour_key) {
        None => diagnostics.push(Diagnostic::new(
            id,
            DiagnosticKind::MissingTag { tag: colour_key },
        )),
        Some(value) => {
            let text = value
                .as_str()
                .map_or_else(|| value.to_string(), str::to_owned);
            if !CARDINAL_BEACON_COLOURS.contains(&text.as_str()) {
                diagnostics.push(Diagnostic::new(
                    id,
                    DiagnosticKind::UnexpectedTagValue {
                        tag: colour_key,
                        value: text,
                    },
                ));
            }
        }
    }
    if !tags.contains_key(&shape_key) {
        diagnostics.push(Diagnostic::new(
            id,
            DiagnosticKind::MissingTag { tag: shape_key },
        ));
    }
    diagnostics
}

fn coordinate_error(err: CoordinateError) -> ValidationError {
    match err {
        CoordinateError::Latitude(value) => {
            ValidationError::malformed("lat", value.to_string(), err.to_string())
        }
        CoordinateError::Longitude(value) => {
            ValidationError::malformed("lon", value.to_string(), err.to_string())
        }
    }
}

fn required_tag<'a>(tags: &'a Tags, key: &str) -> Result<&'a str, ValidationError> {
    match tags.get(key) {
        None => Err(ValidationError::missing(key)),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ValidationError::malformed(
            key,
            other.to_string(),
            "expected a string",
        )),
    }
}

fn optional_tag<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).and_then(Value::as_str)
}

fn read_category(
    id: &str,
    tags: &Tags,
    kind: &SeamarkKind,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<Category>, ValidationError> {
    let Some(system) = kind.system() else {
        return Ok(None);
    };
    let key = attribute_key(kind.tag(), "category");
    if !tags.contains_key(&key) {
        if kind.tag() == CARDINAL_BEACON {
            return Err(ValidationError::missing(key));
        }
        if system == MarkSystem::Cardinal {
            diagnostics.push(Diagnostic::new(id, DiagnosticKind::MissingTag { tag: key }));
        }
        return Ok(None);
    }
    let text = required_tag(tags, &key)?;
    let expected = match system {
        MarkSystem::Cardinal => "expected one of north, east, south, west",
        MarkSystem::Lateral => {
            "expected one of port, starboard, preferred_channel_starboard, preferred_channel_port"
        }
    };
    Category::from_osm(system, text)
        .map(Some)
        .ok_or_else(|| ValidationError::malformed(key, text, expected))
}

fn read_height(
    id: &str,
    tags: &Tags,
    type_tag: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<f64> {
    let key = attribute_key(type_tag, "height");
    let text = optional_tag(tags, &key)?;
    match text.trim().parse::<f64>() {
        Ok(height) if height.is_finite() && height >= 0.0 => Some(height),
        _ => {
            diagnostics.push(Diagnostic::new(
                id,
                DiagnosticKind::UnexpectedTagValue {
                    tag: key,
                    value: text.to_owned(),
                },
            ));
            None
        }
    }
}

fn read_colours(
    id: &str,
    tags: &Tags,
    type_tag: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Colour> {
    let Some(text) = optional_tag(tags, &attribute_key(type_tag, "colour")) else {
        return Vec::new();
    };
    let decoded: Option<Vec<Colour>> = text
        .split(';')
        .map(|name| Colour::from_osm(name.trim()))
        .collect();
    decoded.unwrap_or_else(|| {
        diagnostics.push(Diagnostic::new(
            id,
            DiagnosticKind::UnknownColour {
                value: text.to_owned(),
            },
        ));
        Vec::new()
    })
}

fn read_colour_pattern(
    id: &str,
    tags: &Tags,
    type_tag: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ColourPattern> {
    let text = optional_tag(tags, &attribute_key(type_tag, "colour_pattern"))?;
    let pattern = ColourPattern::from_osm(text.trim());
    if pattern.is_none() {
        diagnostics.push(Diagnostic::new(
            id,
            DiagnosticKind::UnknownColourPattern {
                value: text.to_owned(),
            },
        ));
    }
    pattern
}
