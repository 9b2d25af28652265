//! Data access and ingestion for seamark synchronisation.
//!
//! Responsibilities:
//! - Read raw records from JSON files and the Overpass API.
//! - Normalise crowd-sourced and hydrographic records into
//!   [`seamark_core::SeamarkRecord`]s.
//! - Run the post-hoc coherence checks and collect per-record failures.
//!
//! Boundaries:
//! - Do not encode filtering or export rules (live in `seamark-core`).
//! - Keep the HTTP client behind the synchronous [`RecordSource`] trait.
//!
//! Invariants:
//! - A malformed record never aborts a load; it is reported instead.
//! - No global mutable state.

pub mod description;
mod error;
pub mod ingest;
pub mod normalise;
pub mod source;
mod validate;

pub use description::Description;
pub use error::SourceError;
pub use ingest::{
    IngestReport, RecordFailure, fetch_osm, ingest_osm, ingest_shom, load_osm_file, load_shom_file,
};
pub use normalise::{
    INSPIRE_URL_PREFIX, Normalised, cardinal_beacon_checks, description_checks, normalise_osm,
    normalise_shom, osm_record_id, shom_record_id,
};
pub use source::{
    AreaQuery, DEFAULT_OVERPASS_URL, DEFAULT_USER_AGENT, OverpassSource, OverpassSourceConfig,
    ProviderBuildError, RecordSource, read_records,
};
pub use validate::validate;
