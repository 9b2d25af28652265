//! Readers producing raw records from files and remote queries.
//!
//! Both readers yield a `Vec<RawRecord>`; neither interprets the records.
//! [`RecordSource`] is synchronous so that the pipeline stays a plain
//! function chain; the HTTP implementation blocks on an owned runtime.

mod file;
mod overpass;

#[doc(hidden)]
pub mod test_support;

use seamark_core::{Coordinate, RawRecord};
use serde_json::Value;

use crate::error::SourceError;

pub use file::read_records;
pub use overpass::{
    DEFAULT_OVERPASS_URL, DEFAULT_USER_AGENT, OverpassSource, OverpassSourceConfig, ProviderBuildError,
};

/// Area around a reference point, as used by remote queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaQuery {
    /// Reference position.
    pub center: Coordinate,
    /// Search radius in metres.
    pub radius_m: f64,
}

impl AreaQuery {
    /// Build a query for `radius_m` metres around `center`.
    #[must_use]
    pub const fn new(center: Coordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }
}

/// A provider of raw seamark records for an area.
pub trait RecordSource {
    /// Fetch every raw record inside `query`.
    fn fetch(&self, query: &AreaQuery) -> Result<Vec<RawRecord>, SourceError>;
}

/// Split a JSON array into raw records, rejecting any non-object element.
pub(crate) fn records_from_array(document: Value, origin: &str) -> Result<Vec<RawRecord>, SourceError> {
    let Value::Array(items) = document else {
        return Err(SourceError::Shape {
            origin: origin.to_owned(),
            message: "expected a JSON array of records".to_owned(),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            RawRecord::from_value(item).ok_or_else(|| SourceError::Shape {
                origin: origin.to_owned(),
                message: format!("element {index} is not a JSON object"),
            })
        })
        .collect()
}
