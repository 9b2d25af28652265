//! Core domain types for seamark ingestion.
//!
//! Records read from the crowd-sourced map database and from the
//! hydrographic survey export are normalised into [`SeamarkRecord`] values.
//! Constructors return `Result` so that a record violating the kind/category
//! invariants never exists. Collections filter by geodesic distance and by
//! cross-reference, and records export to the OpenStreetMap tagging schema.

#![forbid(unsafe_code)]

pub mod codes;
pub mod collection;
pub mod coordinate;
pub mod diagnostic;
pub mod export;
pub mod record;

pub use codes::{
    CardinalDirection, Category, Colour, ColourPattern, LateralCategory, MarkSystem, SeamarkKind,
    Structure, join_colours,
};
pub use collection::{SeamarkCollection, SourceMismatch};
pub use coordinate::{Coordinate, CoordinateError};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use export::{ExportNode, TAG_REF_ALADIN, TAG_REF_INSPIRE, TAG_SEAMARK_TYPE, attribute_key};
pub use record::{CrossReference, RawRecord, RecordParts, SeamarkRecord, Source, ValidationError};
