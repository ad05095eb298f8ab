use serde::{Deserialize, Serialize};

use crate::{MosaicError, Result};

/// Highest latitude Web Mercator can represent
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
///
/// Values outside the nominal ranges are kept as-is: the map library clamps
/// or wraps them when drawing, and the store must hand them back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from GeoJSON-style `(longitude, latitude)` order
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self::new(lat, lng)
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Both components are finite numbers (no NaN or infinity)
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Rejects coordinates that cannot be placed on a map
    pub fn ensure_finite(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(MosaicError::InvalidCoordinate(format!(
                "latitude {} / longitude {} must be finite",
                self.lat, self.lng
            )))
        }
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the range Web Mercator can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Copy of this coordinate with latitude clamped and longitude wrapped, for drawing only
    pub fn normalized(&self) -> Self {
        Self::new(Self::clamp_lat(self.lat), Self::wrap_lng(self.lng))
    }

    /// Human readable `lat, lng` readout with fixed precision
    pub fn readout(&self, decimals: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.lat,
            self.lng,
            prec = decimals
        )
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::from_lng_lat(116.4074, 39.9042);
        assert_eq!(coord.lat, 39.9042);
        assert_eq!(coord.lng, 116.4074);
        assert!(coord.is_valid());
        assert!(coord.is_finite());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LatLng::new(0.0, f64::NAN).ensure_finite().is_err());
        assert!(LatLng::new(f64::INFINITY, 0.0).ensure_finite().is_err());
        assert!(matches!(
            LatLng::new(f64::NAN, 0.0).ensure_finite(),
            Err(MosaicError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_out_of_range_is_still_finite() {
        let coord = LatLng::new(95.0, 200.0);
        assert!(!coord.is_valid());
        assert!(coord.ensure_finite().is_ok());

        let drawn = coord.normalized();
        assert!(drawn.lat <= MAX_LATITUDE);
        assert_eq!(drawn.lng, -160.0);
    }

    #[test]
    fn test_readout() {
        let coord = LatLng::new(30.0, 110.123456);
        assert_eq!(coord.readout(4), "30.0000, 110.1235");
    }
}
