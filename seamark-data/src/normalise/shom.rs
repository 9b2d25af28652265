//! Normaliser for the hydrographic office GML/JSON export.

use std::sync::LazyLock;

use regex::Regex;
use seamark_core::{
    CardinalDirection, Category, Colour, ColourPattern, Coordinate, Diagnostic, DiagnosticKind,
    MarkSystem, RawRecord, RecordParts, SeamarkKind, SeamarkRecord, Source, Structure,
    ValidationError,
};
use serde_json::Value;

use super::Normalised;
use crate::description::Description;

/// Prefix of the INSPIRE link attached to every hydrographic record.
pub const INSPIRE_URL_PREFIX: &str = "https://data.shom.fr/inspire/balisage/";

const ID_FIELD: &str = "@gml:id";
const POSITION_FIELD: &str = "tn:geometry.gml:Point.gml:pos";
const DESCRIPTION_FIELD: &str = "gml:description";
const TYPE_FIELD: &str = "type";

static GML_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BALISAGE_(FR[0-9]{15})$").expect("identifier pattern is a valid regex")
});

/// Identifier of a raw record for failure reports, prefix stripped.
#[must_use]
pub fn shom_record_id(raw: &RawRecord) -> Option<String> {
    let id = raw.get(ID_FIELD)?.as_str()?;
    Some(id.strip_prefix("BALISAGE_").unwrap_or(id).to_owned())
}

/// Normalise one hydrographic feature.
///
/// # Examples
/// ```
/// use seamark_core::{CrossReference, RawRecord};
/// use seamark_data::normalise_shom;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let raw = RawRecord::from_value(serde_json::json!({
///     "@gml:id": "BALISAGE_FR123456789012345",
///     "tn:geometry": {"gml:Point": {"gml:pos": "48.8123 -3.5512"}},
///     "type": "beacon",
///     "gml:description": "BCNCAR;CATCAM : 1;HEIGHT : 3.5;COLOUR : 2,6"
/// }))
/// .ok_or("not an object")?;
/// let normalised = normalise_shom(raw)?;
/// let record = &normalised.record;
/// assert_eq!(record.id(), "FR123456789012345");
/// assert_eq!(record.kind().tag(), "beacon_cardinal");
/// assert_eq!(record.height(), Some(3.5));
/// assert!(record.reference(CrossReference::Inspire).is_some());
/// # Ok(())
/// # }
/// ```
pub fn normalise_shom(raw: RawRecord) -> Result<Normalised, ValidationError> {
    let id = parse_identifier(&raw)?;
    let coordinate = parse_position(&raw)?;
    let description = Description::parse(required_str(&raw, DESCRIPTION_FIELD)?);
    let structure = parse_structure(&raw, &description)?;
    let category = parse_category(&description)?;
    let height = description.value("HEIGHT").map(parse_height).transpose()?;

    let mut diagnostics: Vec<Diagnostic> = description
        .malformed()
        .iter()
        .map(|fragment| {
            Diagnostic::new(
                &id,
                DiagnosticKind::MalformedFragment {
                    fragment: fragment.clone(),
                },
            )
        })
        .collect();
    let colours = parse_colours(&id, &description, &mut diagnostics);
    let colour_pattern = description.value("COLPAT").and_then(|code| {
        let pattern = ColourPattern::from_code(code);
        if pattern.is_none() {
            diagnostics.push(Diagnostic::new(
                &id,
                DiagnosticKind::UnknownColourPattern {
                    value: code.to_owned(),
                },
            ));
        }
        pattern
    });
    let registry_ref = description.value("numald").map(str::to_owned);
    let inspire_ref = format!("{INSPIRE_URL_PREFIX}{id}");

    let kind = SeamarkKind::aid(structure, category.system());
    let mut parts = RecordParts::new(id, Source::Shom, coordinate, kind, raw);
    parts.category = Some(category);
    parts.height = height;
    parts.colours = colours;
    parts.colour_pattern = colour_pattern;
    parts.registry_ref = registry_ref;
    parts.inspire_ref = Some(inspire_ref);

    Ok(Normalised {
        record: SeamarkRecord::new(parts)?,
        diagnostics,
    })
}

fn parse_height(text: &str) -> Result<f64, ValidationError> {
    match text.parse::<f64>() {
        Ok(height) if height.is_finite() && height >= 0.0 => Ok(height),
        Ok(_) => Err(ValidationError::malformed(
            "HEIGHT",
            text,
            "expected a finite, non-negative number of metres",
        )),
        Err(_) => Err(ValidationError::malformed("HEIGHT", text, "expected a decimal")),
    }
}

/// Cardinal beacon coherence checks on a parsed description.
///
/// A `BCNCAR` object needs a `CATCAM` code in `1..=4`, and when both
/// `CATCAM` and `COLOUR` are given the colour codes must be exactly the
/// reference scheme for the quadrant.
#[must_use]
pub fn description_checks(id: &str, description: &Description) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let catcam = description.get("CATCAM");

    if description.contains("BCNCAR") {
        match catcam {
            None => diagnostics.push(Diagnostic::new(id, DiagnosticKind::MissingCategoryCode)),
            Some(code) if CardinalDirection::from_code(code).is_none() => {
                diagnostics.push(Diagnostic::new(
                    id,
                    DiagnosticKind::CategoryCodeOutOfRange {
                        code: code.to_owned(),
                    },
                ));
            }
            Some(_) => {}
        }
    }

    if let (Some(code), Some(colour)) = (catcam, description.get("COLOUR")) {
        let expected =
            CardinalDirection::from_code(code).map(CardinalDirection::reference_colour_codes);
        if expected != Some(colour) {
            diagnostics.push(Diagnostic::new(
                id,
                DiagnosticKind::ColourMismatch {
                    category_code: code.to_owned(),
                    colour: colour.to_owned(),
                    expected,
                },
            ));
        }
    }
    diagnostics
}

fn required_str<'a>(raw: &'a RawRecord, field: &str) -> Result<&'a str, ValidationError> {
    match raw.get(field) {
        None => Err(ValidationError::missing(field)),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ValidationError::malformed(
            field,
            other.to_string(),
            "expected a string",
        )),
    }
}

fn parse_identifier(raw: &RawRecord) -> Result<String, ValidationError> {
    let text = required_str(raw, ID_FIELD)?;
    GML_ID
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_owned())
        .ok_or_else(|| {
            ValidationError::malformed(ID_FIELD, text, "expected BALISAGE_FR followed by 15 digits")
        })
}

fn parse_position(raw: &RawRecord) -> Result<Coordinate, ValidationError> {
    let value = raw
        .get("tn:geometry")
        .and_then(|geometry| geometry.get("gml:Point"))
        .and_then(|point| point.get("gml:pos"))
        .ok_or_else(|| ValidationError::missing(POSITION_FIELD))?;
    let text = value.as_str().ok_or_else(|| {
        ValidationError::malformed(POSITION_FIELD, value.to_string(), "expected a string")
    })?;

    let mut numbers = text.split_whitespace();
    let (Some(lat), Some(lon), None) = (numbers.next(), numbers.next(), numbers.next()) else {
        return Err(ValidationError::malformed(
            POSITION_FIELD,
            text,
            "expected \"lat lon\"",
        ));
    };
    let parse = |part: &str| {
        part.parse::<f64>().map_err(|_| {
            ValidationError::malformed(POSITION_FIELD, text, format!("{part:?} is not a number"))
        })
    };
    Coordinate::new(parse(lat)?, parse(lon)?)
        .map_err(|err| ValidationError::malformed(POSITION_FIELD, text, err.to_string()))
}

fn parse_structure(
    raw: &RawRecord,
    description: &Description,
) -> Result<Structure, ValidationError> {
    match raw.get(TYPE_FIELD) {
        Some(Value::String(text)) => Structure::from_discriminator(text).ok_or_else(|| {
            ValidationError::malformed(TYPE_FIELD, text.as_str(), "expected beacon or buoy")
        }),
        Some(other) => Err(ValidationError::malformed(
            TYPE_FIELD,
            other.to_string(),
            "expected beacon or buoy",
        )),
        None => description
            .object_class()
            .and_then(structure_from_object_class)
            .ok_or_else(|| ValidationError::missing(TYPE_FIELD)),
    }
}

fn structure_from_object_class(class: &str) -> Option<Structure> {
    if class.starts_with("BCN") {
        Some(Structure::Beacon)
    } else if class.starts_with("BOY") {
        Some(Structure::Buoy)
    } else {
        None
    }
}

fn parse_category(description: &Description) -> Result<Category, ValidationError> {
    let (field, system, code) = match (description.get("CATCAM"), description.get("CATLAM")) {
        (Some(code), None) => ("CATCAM", MarkSystem::Cardinal, code),
        (None, Some(code)) => ("CATLAM", MarkSystem::Lateral, code),
        (Some(_), Some(_)) => {
            return Err(ValidationError::inconsistent(
                "CATCAM",
                "CATCAM and CATLAM are mutually exclusive",
            ));
        }
        (None, None) => return Err(ValidationError::missing("CATCAM or CATLAM")),
    };
    Category::from_code(system, code)
        .ok_or_else(|| ValidationError::malformed(field, code, "expected one of 1, 2, 3, 4"))
}

fn parse_colours(
    id: &str,
    description: &Description,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Colour> {
    let Some(codes) = description.value("COLOUR") else {
        return Vec::new();
    };
    let decoded: Option<Vec<Colour>> = codes
        .split(',')
        .map(|code| Colour::from_code(code.trim()))
        .collect();
    decoded.unwrap_or_else(|| {
        diagnostics.push(Diagnostic::new(
            id,
            DiagnosticKind::UnknownColour {
                value: codes.to_owned(),
            },
        ));
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use seamark_core::{CrossReference, LateralCategory};
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        RawRecord::from_value(value).expect("fixture is an object")
    }

    #[fixture]
    fn feature() -> Value {
        json!({
            "@gml:id": "BALISAGE_FR123456789012345",
            "tn:geometry": {"gml:Point": {"gml:pos": "48.8123 -3.5512"}},
            "type": "beacon",
            "gml:description": "BCNCAR;CATCAM : 1;HEIGHT : 3.5;COLOUR : 2,6;COLPAT : 1;numald : 22900123"
        })
    }

    fn with_description(mut feature: Value, description: &str) -> Value {
        feature["gml:description"] = json!(description);
        feature
    }

    #[rstest]
    fn normalises_cardinal_beacon(feature: Value) {
        let normalised = normalise_shom(raw(feature)).expect("valid feature");
        let record = &normalised.record;
        assert_eq!(record.id(), "FR123456789012345");
        assert_eq!(record.kind().tag(), "beacon_cardinal");
        assert_eq!(
            record.category(),
            Some(Category::Cardinal(CardinalDirection::North))
        );
        assert_eq!(record.height(), Some(3.5));
        assert_eq!(record.colours(), [Colour::Black, Colour::Yellow]);
        assert_eq!(record.colour_pattern(), Some(ColourPattern::Horizontal));
        assert_eq!(record.reference(CrossReference::Registry), Some("22900123"));
        assert_eq!(
            record.reference(CrossReference::Inspire),
            Some("https://data.shom.fr/inspire/balisage/FR123456789012345")
        );
        assert!((record.coordinate().lat() - 48.8123).abs() < 1e-12);
        assert!((record.coordinate().lon() + 3.5512).abs() < 1e-12);
        assert!(normalised.diagnostics.is_empty());
    }

    #[rstest]
    #[case("BALISAGE_FR12345678901234")]
    #[case("BALISAGE_FR1234567890123456")]
    #[case("FR123456789012345")]
    #[case("BALISAGE_GB123456789012345")]
    fn rejects_malformed_identifiers(mut feature: Value, #[case] id: &str) {
        feature[ID_FIELD] = json!(id);
        let err = normalise_shom(raw(feature)).expect_err("bad identifier");
        assert_eq!(err.field(), ID_FIELD);
    }

    #[rstest]
    #[case("48.8")]
    #[case("48.8 -3.5 0")]
    #[case("north west")]
    #[case("95.0 -3.5")]
    fn rejects_bad_positions(mut feature: Value, #[case] pos: &str) {
        feature["tn:geometry"]["gml:Point"]["gml:pos"] = json!(pos);
        let err = normalise_shom(raw(feature)).expect_err("bad position");
        assert_eq!(err.field(), POSITION_FIELD);
    }

    #[rstest]
    fn lateral_buoy_from_object_class(mut feature: Value) {
        feature.as_object_mut().expect("object").remove(TYPE_FIELD);
        let feature = with_description(feature, "BOYLAT;CATLAM : 2");
        let record = normalise_shom(raw(feature)).expect("valid").record;
        assert_eq!(record.kind().tag(), "buoy_lateral");
        assert_eq!(
            record.category(),
            Some(Category::Lateral(LateralCategory::Starboard))
        );
    }

    #[rstest]
    fn missing_structure_is_fatal(mut feature: Value) {
        feature.as_object_mut().expect("object").remove(TYPE_FIELD);
        let feature = with_description(feature, "CATCAM : 1");
        let err = normalise_shom(raw(feature)).expect_err("no structure");
        assert_eq!(err.field(), TYPE_FIELD);
    }

    #[rstest]
    #[case("BCNCAR;CATCAM : 1;CATLAM : 2", "Inconsistent")]
    #[case("BCNCAR;HEIGHT : 3", "Missing")]
    #[case("BCNCAR;CATCAM : 5", "Malformed")]
    #[case("BCNCAR;CATCAM : 1;HEIGHT : tall", "Malformed")]
    fn rejects_bad_descriptions(feature: Value, #[case] text: &str, #[case] variant: &str) {
        let err = normalise_shom(raw(with_description(feature, text))).expect_err("invalid");
        let found = match err {
            ValidationError::Missing { .. } => "Missing",
            ValidationError::Malformed { .. } => "Malformed",
            ValidationError::Inconsistent { .. } => "Inconsistent",
        };
        assert_eq!(found, variant);
    }

    #[rstest]
    #[case("tall")]
    #[case("NaN")]
    #[case("inf")]
    #[case("-2")]
    fn invalid_height_names_the_source_attribute(feature: Value, #[case] height: &str) {
        let text = format!("BCNCAR;CATCAM : 1;HEIGHT : {height}");
        let err = normalise_shom(raw(with_description(feature, &text))).expect_err("bad height");
        assert!(matches!(err, ValidationError::Malformed { .. }));
        assert_eq!(err.field(), "HEIGHT");
    }

    #[rstest]
    fn unknown_colour_code_is_dropped_with_diagnostic(feature: Value) {
        let feature = with_description(feature, "BCNCAR;CATCAM : 1;COLOUR : 2,99");
        let normalised = normalise_shom(raw(feature)).expect("valid");
        assert!(normalised.record.colours().is_empty());
        assert_eq!(
            normalised.diagnostics,
            [Diagnostic::new(
                "FR123456789012345",
                DiagnosticKind::UnknownColour {
                    value: "2,99".to_owned()
                }
            )]
        );
    }

    #[rstest]
    fn malformed_fragments_are_reported(feature: Value) {
        let feature = with_description(feature, "BCNCAR;CATCAM : 3;painted last spring");
        let normalised = normalise_shom(raw(feature)).expect("valid");
        assert!(normalised.diagnostics.iter().any(|d| matches!(
            &d.kind,
            DiagnosticKind::MalformedFragment { fragment } if fragment == "painted last spring"
        )));
    }

    #[rstest]
    #[case("1", "2,6", None)]
    #[case("4", "6,2,6", None)]
    #[case("1", "6,2", Some("2,6"))]
    #[case("3", "2,6", Some("6,2"))]
    fn colour_must_match_quadrant(
        #[case] code: &str,
        #[case] colour: &str,
        #[case] expected: Option<&'static str>,
    ) {
        let description = Description::parse(&format!("BCNCAR;CATCAM : {code};COLOUR : {colour}"));
        let diagnostics = description_checks("FR1", &description);
        match expected {
            None => assert!(diagnostics.is_empty(), "{diagnostics:?}"),
            Some(reference) => assert_eq!(
                diagnostics,
                [Diagnostic::new(
                    "FR1",
                    DiagnosticKind::ColourMismatch {
                        category_code: code.to_owned(),
                        colour: colour.to_owned(),
                        expected: Some(reference),
                    }
                )]
            ),
        }
    }

    #[rstest]
    fn cardinal_object_without_catcam_is_flagged() {
        let diagnostics = description_checks("FR1", &Description::parse("BCNCAR;HEIGHT : 2"));
        assert_eq!(
            diagnostics,
            [Diagnostic::new("FR1", DiagnosticKind::MissingCategoryCode)]
        );
    }

    #[rstest]
    fn out_of_range_catcam_is_flagged_once_per_check() {
        let diagnostics =
            description_checks("FR1", &Description::parse("BCNCAR;CATCAM : 7;COLOUR : 2,6"));
        let kinds: Vec<_> = diagnostics.into_iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [
                DiagnosticKind::CategoryCodeOutOfRange {
                    code: "7".to_owned()
                },
                DiagnosticKind::ColourMismatch {
                    category_code: "7".to_owned(),
                    colour: "2,6".to_owned(),
                    expected: None,
                },
            ]
        );
    }

    #[rstest]
    fn record_id_strips_prefix(feature: Value) {
        assert_eq!(
            shom_record_id(&raw(feature)).as_deref(),
            Some("FR123456789012345")
        );
    }
}
