//! Error types emitted by the seamark CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use seamark_core::CoordinateError;
use seamark_data::{ProviderBuildError, SourceError};
use thiserror::Error;

/// Errors emitted by the seamark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The reference position is not a valid WGS84 coordinate.
    #[error("invalid reference position: {0}")]
    InvalidPosition(#[source] CoordinateError),
    /// The search radius is not a positive, finite number of metres.
    #[error("radius must be a positive number of metres, got {radius}")]
    InvalidRadius { radius: f64 },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Constructing the Overpass client failed.
    #[error("failed to build Overpass client for {endpoint:?}: {source}")]
    BuildSource {
        endpoint: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Loading records failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Serialising the exported nodes failed.
    #[error("failed to serialise exported nodes: {0}")]
    SerialiseNodes(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
