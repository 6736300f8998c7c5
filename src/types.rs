//! Core value types for orthomapper

use serde::{Deserialize, Serialize};

/// Geodetic bounding box in decimal degrees (WGS84)
///
/// `west < east` and `south < north` always hold for a valid box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    /// Creates new geodetic bounds
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    /// Returns whether the box lies inside the geodetic domain
    pub fn is_geodetic(&self) -> bool {
        self.west >= -180.0
            && self.east <= 180.0
            && self.south >= -90.0
            && self.north <= 90.0
            && self.west < self.east
            && self.south < self.north
    }

    /// Longitude span in degrees
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span in degrees
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Latitude of the box center
    pub fn center_latitude(&self) -> f64 {
        (self.south + self.north) / 2.0
    }
}

/// Bounding box in a raster's native projected CRS (commonly a UTM zone)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ProjectedBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }
}

/// Raster dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the total number of pixels
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A pixel position within a source image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelCoordinate {
    pub x: f64,
    pub y: f64,
}

impl PixelCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A ground position derived from a source-image pixel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the image-center ground point, in meters
    pub distance_from_center: f64,
}

/// One candidate observation of a real-world object, before deduplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsDetection {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: f64,
}

impl GpsDetection {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, confidence: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_bounds_validity() {
        let bounds = GeoBounds::new(11.5, 47.2, 11.6, 47.3);
        assert!(bounds.is_geodetic());

        // A UTM box mistaken for geodetic must be rejected
        let projected = GeoBounds::new(680000.0, 5230000.0, 681000.0, 5231000.0);
        assert!(!projected.is_geodetic());

        let inverted = GeoBounds::new(11.6, 47.2, 11.5, 47.3);
        assert!(!inverted.is_geodetic());
    }

    #[test]
    fn test_geo_bounds_spans() {
        let bounds = GeoBounds::new(10.0, 40.0, 12.0, 44.0);
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(bounds.height(), 4.0);
        assert_eq!(bounds.center_latitude(), 42.0);
    }

    #[test]
    fn test_dimensions() {
        let dims = Dimensions::new(4000, 3000);
        assert_eq!(dims.pixel_count(), 12_000_000);
    }
}
