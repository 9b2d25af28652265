//! Test utilities for record sources.
//!
//! This module provides [`StubRecordSource`], a deterministic test double for
//! [`RecordSource`] that returns pre-configured responses without making
//! HTTP requests.

use seamark_core::RawRecord;

use super::{AreaQuery, RecordSource};
use crate::error::SourceError;

/// Stub `RecordSource` for testing.
///
/// # Example
///
/// ```
/// use seamark_core::{Coordinate, RawRecord};
/// use seamark_data::source::test_support::StubRecordSource;
/// use seamark_data::{AreaQuery, RecordSource};
///
/// let record = RawRecord::from_value(serde_json::json!({"id": 1})).expect("object");
/// let source = StubRecordSource::with_records(vec![record]);
/// let query = AreaQuery::new(Coordinate::new(0.0, 0.0).expect("valid"), 10.0);
///
/// assert_eq!(source.fetch(&query).map(|records| records.len()).ok(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct StubRecordSource {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Records(Vec<RawRecord>),
    Error(fn() -> SourceError),
}

impl StubRecordSource {
    /// Create a source that returns the given records for any query.
    #[must_use]
    pub const fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            response: StubResponse::Records(records),
        }
    }

    /// Create a source that fails with the error built by `make_error`.
    #[must_use]
    pub const fn with_error(make_error: fn() -> SourceError) -> Self {
        Self {
            response: StubResponse::Error(make_error),
        }
    }
}

impl RecordSource for StubRecordSource {
    fn fetch(&self, _query: &AreaQuery) -> Result<Vec<RawRecord>, SourceError> {
        match &self.response {
            StubResponse::Records(records) => Ok(records.clone()),
            StubResponse::Error(make_error) => Err(make_error()),
        }
    }
}
