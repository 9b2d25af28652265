//! Non-fatal findings reported alongside normalised records.

use std::fmt;

/// What a [`Diagnostic`] is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A recommended tag is absent.
    MissingTag {
        /// Tag key.
        tag: String,
    },
    /// A tag carries a value outside the expected set.
    UnexpectedTagValue {
        /// Tag key.
        tag: String,
        /// Value found.
        value: String,
    },
    /// A colour code or name is not in the colour table.
    UnknownColour {
        /// Offending code or name.
        value: String,
    },
    /// A colour pattern code or name is not in the pattern table.
    UnknownColourPattern {
        /// Offending code or name.
        value: String,
    },
    /// A cardinal beacon has no `CATCAM` attribute.
    MissingCategoryCode,
    /// `CATCAM` holds a value outside `1..=4`.
    CategoryCodeOutOfRange {
        /// Value found.
        code: String,
    },
    /// The painted colours do not match the cardinal category.
    ColourMismatch {
        /// `CATCAM` value.
        category_code: String,
        /// `COLOUR` value found.
        colour: String,
        /// `COLOUR` value expected for the category, when the code is known.
        expected: Option<&'static str>,
    },
    /// A description fragment could not be parsed as `KEY : VALUE`.
    MalformedFragment {
        /// Fragment text.
        fragment: String,
    },
}

/// A non-fatal finding about one record.
///
/// Diagnostics never reject a record; they are returned to the caller next to
/// the record they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Identifier of the record, in source terms.
    pub record_id: String,
    /// The finding.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Build a diagnostic for `record_id`.
    pub fn new(record_id: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            record_id: record_id.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.record_id)?;
        match &self.kind {
            DiagnosticKind::MissingTag { tag } => write!(f, "`{tag}` should be present"),
            DiagnosticKind::UnexpectedTagValue { tag, value } => {
                write!(f, "`{tag}` has unexpected value {value:?}")
            }
            DiagnosticKind::UnknownColour { value } => write!(f, "unknown colour {value:?}"),
            DiagnosticKind::UnknownColourPattern { value } => {
                write!(f, "unknown colour pattern {value:?}")
            }
            DiagnosticKind::MissingCategoryCode => {
                f.write_str("cardinal beacon without CATCAM attribute")
            }
            DiagnosticKind::CategoryCodeOutOfRange { code } => {
                write!(f, "CATCAM {code:?} should be one of 1, 2, 3, 4")
            }
            DiagnosticKind::ColourMismatch {
                category_code,
                colour,
                expected,
            } => {
                write!(f, "COLOUR {colour:?} is not coherent with CATCAM {category_code}")?;
                match expected {
                    Some(reference) => write!(f, " (expected {reference:?})"),
                    None => Ok(()),
                }
            }
            DiagnosticKind::MalformedFragment { fragment } => {
                write!(f, "malformed description fragment {fragment:?}")
            }
        }
    }
}
