//! Error types produced while reading source documents.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while loading raw records from a file or a remote query.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The source file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The document is not valid JSON.
    #[error("failed to parse JSON from {origin}")]
    Json {
        /// File path or URL the document came from.
        origin: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// The document is valid JSON but not the expected shape.
    #[error("unexpected document shape from {origin}: {message}")]
    Shape {
        /// File path or URL the document came from.
        origin: String,
        /// What was expected.
        message: String,
    },
    /// The request could not reach the endpoint.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport failure description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The endpoint answered with a non-success status.
    #[error("request to {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
}

impl SourceError {
    /// Whether the document itself was malformed.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Json { .. } | Self::Shape { .. })
    }

    /// Whether the failure happened on the network transport.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Http { .. }
        )
    }
}
