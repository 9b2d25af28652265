//! Facade crate for seamark synchronisation.
//!
//! This crate re-exports the core domain types and, behind the default `data`
//! feature, the source readers, normalisers and loaders.

#![forbid(unsafe_code)]

pub use seamark_core::{
    CardinalDirection, Category, Colour, ColourPattern, Coordinate, CoordinateError,
    CrossReference, Diagnostic, DiagnosticKind, ExportNode, LateralCategory, MarkSystem,
    RawRecord, SeamarkCollection, SeamarkKind, SeamarkRecord, Source, Structure,
    ValidationError,
};

#[cfg(feature = "data")]
pub use seamark_data::{
    AreaQuery, Description, IngestReport, OverpassSource, OverpassSourceConfig, RecordFailure,
    RecordSource, SourceError, fetch_osm, ingest_osm, ingest_shom, load_osm_file,
    load_shom_file, normalise_osm, normalise_shom, validate,
};
