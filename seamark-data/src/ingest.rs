//! Collection loaders.
//!
//! A loader normalises every raw record of one source. Records that fail
//! validation are reported with their position and identifier and never
//! abort the load; diagnostics are logged and kept on the report.

use std::fmt;

use camino::Utf8Path;
use log::{debug, warn};
use seamark_core::{Diagnostic, RawRecord, SeamarkCollection, Source, ValidationError};

use crate::error::SourceError;
use crate::normalise::{Normalised, normalise_osm, normalise_shom, osm_record_id, shom_record_id};
use crate::source::{AreaQuery, RecordSource, read_records};

type Normaliser = fn(RawRecord) -> Result<Normalised, ValidationError>;
type RecordId = fn(&RawRecord) -> Option<String>;

/// A raw record that could not be normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position of the record in its source document.
    pub index: usize,
    /// Identifier of the record, when one could be read.
    pub id: Option<String>,
    /// Why the record was rejected.
    pub error: ValidationError,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "record {} ({id}): {}", self.index, self.error),
            None => write!(f, "record {}: {}", self.index, self.error),
        }
    }
}

/// Outcome of loading one source.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Every record that normalised successfully, in source order.
    pub collection: SeamarkCollection,
    /// Records rejected during normalisation.
    pub failures: Vec<RecordFailure>,
    /// Non-fatal findings on accepted records.
    pub diagnostics: Vec<Diagnostic>,
}

impl IngestReport {
    fn new(source: Source) -> Self {
        Self {
            collection: SeamarkCollection::new(source),
            failures: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Whether every record was accepted without findings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.diagnostics.is_empty()
    }

    fn reject(&mut self, index: usize, id: Option<String>, error: ValidationError) {
        let failure = RecordFailure { index, id, error };
        warn!("skipping {failure}");
        self.failures.push(failure);
    }
}

/// Normalise crowd-sourced node dictionaries.
pub fn ingest_osm<I>(records: I) -> IngestReport
where
    I: IntoIterator<Item = RawRecord>,
{
    ingest(Source::Osm, records, normalise_osm, osm_record_id)
}

/// Normalise hydrographic features.
///
/// # Examples
/// ```
/// use seamark_core::RawRecord;
/// use seamark_data::ingest_shom;
///
/// let good = RawRecord::from_value(serde_json::json!({
///     "@gml:id": "BALISAGE_FR123456789012345",
///     "tn:geometry": {"gml:Point": {"gml:pos": "48.81 -3.55"}},
///     "type": "beacon",
///     "gml:description": "BCNCAR;CATCAM : 4;COLOUR : 6,2,6"
/// }));
/// let bad = RawRecord::from_value(serde_json::json!({"@gml:id": "BALISAGE_X"}));
/// let report = ingest_shom(good.into_iter().chain(bad));
///
/// assert_eq!(report.collection.len(), 1);
/// assert_eq!(report.failures.len(), 1);
/// assert_eq!(report.failures[0].index, 1);
/// ```
pub fn ingest_shom<I>(records: I) -> IngestReport
where
    I: IntoIterator<Item = RawRecord>,
{
    ingest(Source::Shom, records, normalise_shom, shom_record_id)
}

/// Read and normalise a crowd-sourced JSON file.
///
/// # Errors
///
/// Returns [`SourceError`] when the file cannot be read or is not a JSON
/// array of objects. Invalid records are reported, not returned as errors.
pub fn load_osm_file(path: &Utf8Path) -> Result<IngestReport, SourceError> {
    read_records(path).map(ingest_osm)
}

/// Read and normalise a hydrographic JSON export.
///
/// # Errors
///
/// Returns [`SourceError`] when the file cannot be read or is not a JSON
/// array of objects. Invalid records are reported, not returned as errors.
pub fn load_shom_file(path: &Utf8Path) -> Result<IngestReport, SourceError> {
    read_records(path).map(ingest_shom)
}

/// Fetch crowd-sourced nodes for `query` and normalise them.
///
/// # Errors
///
/// Propagates the source's [`SourceError`].
pub fn fetch_osm<S>(source: &S, query: &AreaQuery) -> Result<IngestReport, SourceError>
where
    S: RecordSource + ?Sized,
{
    source.fetch(query).map(ingest_osm)
}

fn ingest<I>(source: Source, records: I, normalise: Normaliser, record_id: RecordId) -> IngestReport
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut report = IngestReport::new(source);
    for (index, raw) in records.into_iter().enumerate() {
        let id = record_id(&raw);
        match normalise(raw) {
            Ok(Normalised {
                record,
                diagnostics,
            }) => {
                for diagnostic in &diagnostics {
                    warn!("{diagnostic}");
                }
                if let Err(mismatch) = report.collection.push(record) {
                    report.reject(
                        index,
                        id,
                        ValidationError::inconsistent("source", mismatch.to_string()),
                    );
                    continue;
                }
                report.diagnostics.extend(diagnostics);
            }
            Err(error) => report.reject(index, id, error),
        }
    }
    debug!(
        "{source}: {} records accepted, {} rejected, {} diagnostics",
        report.collection.len(),
        report.failures.len(),
        report.diagnostics.len()
    );
    report
}
