//! Ordered, single-source collections of seamarks and their filters.

use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::record::{CrossReference, SeamarkRecord, Source};

/// A record from one source was added to a collection of another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {id} comes from {found}, collection holds {expected} records")]
pub struct SourceMismatch {
    /// Identifier of the rejected record.
    pub id: String,
    /// Source of the collection.
    pub expected: Source,
    /// Source of the rejected record.
    pub found: Source,
}

/// An ordered sequence of records sharing a common [`Source`].
///
/// Filters never modify the collection; they return a new one holding the
/// surviving records in their original relative order.
///
/// # Examples
/// ```
/// use seamark_core::{Coordinate, SeamarkCollection, Source};
///
/// # fn main() -> Result<(), seamark_core::CoordinateError> {
/// let collection = SeamarkCollection::new(Source::Osm);
/// let nearby = collection.within(Coordinate::new(48.8, -3.5)?, 1_000.0);
/// assert!(nearby.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeamarkCollection {
    source: Source,
    records: Vec<SeamarkRecord>,
}

impl SeamarkCollection {
    /// Create an empty collection for `source`.
    #[must_use]
    pub const fn new(source: Source) -> Self {
        Self {
            source,
            records: Vec::new(),
        }
    }

    /// Append a record, rejecting records from another source.
    pub fn push(&mut self, record: SeamarkRecord) -> Result<(), SourceMismatch> {
        if record.source() != self.source {
            return Err(SourceMismatch {
                id: record.id().to_owned(),
                expected: self.source,
                found: record.source(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Source shared by every record.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeamarkRecord> {
        self.records.iter()
    }

    /// Borrow the records as a slice.
    #[must_use]
    pub fn records(&self) -> &[SeamarkRecord] {
        &self.records
    }

    /// Keep records strictly closer than `radius_m` metres to `center`.
    ///
    /// Distances are geodesic on the WGS84 ellipsoid. A record lying exactly
    /// on the radius is excluded.
    #[must_use]
    pub fn within(&self, center: Coordinate, radius_m: f64) -> Self {
        self.retain(|record| record.distance_to(center) < radius_m)
    }

    /// Keep records whose cross-reference of `kind` equals `value`.
    #[must_use]
    pub fn with_reference(&self, kind: CrossReference, value: &str) -> Self {
        self.retain(|record| record.reference(kind) == Some(value))
    }

    fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&SeamarkRecord) -> bool,
    {
        Self {
            source: self.source,
            records: self
                .records
                .iter()
                .filter(|record| keep(record))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SeamarkCollection {
    type Item = &'a SeamarkRecord;
    type IntoIter = std::slice::Iter<'a, SeamarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for SeamarkCollection {
    type Item = SeamarkRecord;
    type IntoIter = std::vec::IntoIter<SeamarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::SeamarkKind;
    use crate::record::{RawRecord, RecordParts};
    use rstest::{fixture, rstest};

    fn record(id: &str, source: Source, lat: f64, lon: f64) -> SeamarkRecord {
        let mut parts = RecordParts::new(
            id,
            source,
            Coordinate::new(lat, lon).expect("valid coordinate"),
            SeamarkKind::from_tag("light_minor"),
            RawRecord::default(),
        );
        parts.registry_ref = Some(format!("ALD-{id}"));
        SeamarkRecord::new(parts).expect("valid record")
    }

    #[fixture]
    fn center() -> Coordinate {
        Coordinate::new(48.80773, -3.56122).expect("valid coordinate")
    }

    #[fixture]
    fn collection() -> SeamarkCollection {
        let mut collection = SeamarkCollection::new(Source::Osm);
        for (id, lat, lon) in [
            ("far", 48.90, -3.56122),
            ("near", 48.808, -3.5612),
            ("mid", 48.81, -3.57),
            ("nearest", 48.80773, -3.56122),
        ] {
            collection
                .push(record(id, Source::Osm, lat, lon))
                .expect("same source");
        }
        collection
    }

    fn ids(collection: &SeamarkCollection) -> Vec<&str> {
        collection.iter().map(SeamarkRecord::id).collect()
    }

    #[rstest]
    fn within_preserves_order(collection: SeamarkCollection, center: Coordinate) {
        let nearby = collection.within(center, 1_000.0);
        assert_eq!(ids(&nearby), ["near", "mid", "nearest"]);
        assert_eq!(nearby.source(), Source::Osm);
        assert_eq!(collection.len(), 4, "input must be left untouched");
    }

    #[rstest]
    fn within_excludes_boundary(collection: SeamarkCollection, center: Coordinate) {
        let mid = collection
            .iter()
            .find(|record| record.id() == "mid")
            .expect("fixture contains mid");
        let exact = mid.distance_to(center);
        assert!(!ids(&collection.within(center, exact)).contains(&"mid"));
        assert!(ids(&collection.within(center, exact + 0.001)).contains(&"mid"));
    }

    #[rstest]
    fn zero_radius_keeps_nothing(collection: SeamarkCollection, center: Coordinate) {
        assert!(collection.within(center, 0.0).is_empty());
    }

    #[rstest]
    fn filters_by_reference(collection: SeamarkCollection) {
        let matched = collection.with_reference(CrossReference::Registry, "ALD-mid");
        assert_eq!(ids(&matched), ["mid"]);
        assert!(
            collection
                .with_reference(CrossReference::Inspire, "ALD-mid")
                .is_empty()
        );
    }

    #[rstest]
    fn push_rejects_other_source(mut collection: SeamarkCollection) {
        let err = collection
            .push(record("shom", Source::Shom, 48.8, -3.5))
            .expect_err("mixed sources");
        assert_eq!(err.expected, Source::Osm);
        assert_eq!(err.found, Source::Shom);
        assert_eq!(collection.len(), 4);
    }
}
