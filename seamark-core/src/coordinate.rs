//! WGS84 positions and geodesic distance.

use geo::{Distance, Geodesic, Point};
use serde::Serialize;
use thiserror::Error;

/// A validated WGS84 position in decimal degrees.
///
/// # Examples
/// ```
/// use seamark_core::Coordinate;
///
/// # fn main() -> Result<(), seamark_core::CoordinateError> {
/// let perros = Coordinate::new(48.80773, -3.56122)?;
/// assert_eq!(perros.lat(), 48.80773);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was not finite or outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    /// Longitude was not finite or outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Convert to a `geo` point with `x = longitude`, `y = latitude`.
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Ellipsoidal distance in metres, computed with Karney's geodesic
    /// algorithm on the WGS84 ellipsoid.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        Geodesic.distance(self.to_point(), other.to_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_boundary_values(#[case] lat: f64, #[case] lon: f64) {
        assert!(Coordinate::new(lat, lon).is_ok());
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(f64::NAN, 0.0)]
    fn rejects_bad_latitude(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            Coordinate::new(lat, lon),
            Err(CoordinateError::Latitude(_))
        ));
    }

    #[rstest]
    #[case(0.0, 180.1)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_bad_longitude(#[case] lat: f64, #[case] lon: f64) {
        assert!(matches!(
            Coordinate::new(lat, lon),
            Err(CoordinateError::Longitude(_))
        ));
    }

    #[rstest]
    fn point_uses_lon_as_x() {
        let point = Coordinate::new(48.8, -3.5).expect("valid").to_point();
        assert_eq!(point.x(), -3.5);
        assert_eq!(point.y(), 48.8);
    }

    #[rstest]
    fn distance_is_ellipsoidal() {
        // One degree of latitude at the equator is 110 574 m on WGS84,
        // whereas a spherical model yields roughly 111 195 m.
        let origin = Coordinate::new(0.0, 0.0).expect("valid");
        let north = Coordinate::new(1.0, 0.0).expect("valid");
        let metres = origin.distance_to(north);
        assert!((metres - 110_574.4).abs() < 1.0, "got {metres}");
    }

    #[rstest]
    fn distance_to_self_is_zero() {
        let here = Coordinate::new(48.80773, -3.56122).expect("valid");
        assert_eq!(here.distance_to(here), 0.0);
    }
}
