//! Slippy-map grid math: tile indexing, resolutions and zoom selection

use std::f64::consts::PI;

use crate::types::{Dimensions, GeoBounds};

/// Edge length of an output tile in pixels
pub const TILE_SIZE: u32 = 256;

/// Hard ceiling for the maximum zoom level
pub const MAX_ZOOM: u8 = 22;

/// Hard floor for the minimum zoom level
pub const MIN_ZOOM: u8 = 10;

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Web Mercator ground resolution at zoom 0 for a 256px tile, in m/px
const ZOOM0_RESOLUTION: f64 = 156_543.033_928_040_97;

/// A tile address in the standard slippy-map scheme
///
/// `x` grows eastward from 180W, `y` grows southward from ~85N; both lie in
/// `[0, 2^zoom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoordinate {
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// Geodetic bounds covered by this tile
    pub fn bounds(&self) -> GeoBounds {
        let n = (1u32 << self.zoom) as f64;
        let west = self.x as f64 / n * 360.0 - 180.0;
        let east = (self.x + 1) as f64 / n * 360.0 - 180.0;
        let north = tile_edge_latitude(self.y, n);
        let south = tile_edge_latitude(self.y + 1, n);
        GeoBounds::new(west, south, east, north)
    }
}

/// Latitude of a horizontal tile edge (Mercator inverse)
fn tile_edge_latitude(y: u32, n: f64) -> f64 {
    let t = PI * (1.0 - 2.0 * y as f64 / n);
    t.sinh().atan().to_degrees()
}

/// Tile column containing a longitude at the given zoom
pub fn lon_to_tile_x(lon: f64, zoom: u8) -> u32 {
    let n = (1u32 << zoom) as f64;
    let x = ((lon + 180.0) / 360.0 * n).floor();
    (x.max(0.0) as u32).min(n as u32 - 1)
}

/// Tile row containing a latitude at the given zoom
///
/// Uses the Mercator forward projection, not linear interpolation.
pub fn lat_to_tile_y(lat: f64, zoom: u8) -> u32 {
    let n = (1u32 << zoom) as f64;
    let lat_rad = lat.to_radians();
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor();
    (y.max(0.0) as u32).min(n as u32 - 1)
}

/// Web Mercator ground resolution at a zoom level and latitude, in m/px
pub fn zoom_resolution(zoom: u8, latitude: f64) -> f64 {
    ZOOM0_RESOLUTION * latitude.to_radians().cos() / (1u32 << zoom) as f64
}

/// Ground extent of the raster in meters, `(width_m, height_m)`
///
/// Longitude degrees shrink with latitude; the box's center latitude is
/// used for the scale.
pub fn ground_extent_m(bounds: &GeoBounds) -> (f64, f64) {
    let width_m =
        bounds.width() * METERS_PER_DEGREE * bounds.center_latitude().to_radians().cos();
    let height_m = bounds.height() * METERS_PER_DEGREE;
    (width_m, height_m)
}

/// Native ground resolution of the raster in m/px
///
/// The finer of the two axes wins, so zoom selection never undersamples the
/// sharper axis.
pub fn native_resolution(bounds: &GeoBounds, dims: Dimensions) -> f64 {
    let (width_m, height_m) = ground_extent_m(bounds);
    let res_x = width_m / dims.width as f64;
    let res_y = height_m / dims.height as f64;
    res_x.min(res_y)
}

/// Inclusive zoom-level range for a pyramid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub min: u8,
    pub max: u8,
}

impl ZoomRange {
    /// Iterator over the levels in the range
    pub fn levels(&self) -> impl Iterator<Item = u8> {
        self.min..=self.max
    }
}

/// Selects the zoom-level range for a raster
///
/// The maximum zoom is the deepest level whose Web Mercator resolution stays
/// within a 2x upscaling tolerance of the raster's native resolution, capped
/// at [`MAX_ZOOM`]. The minimum zoom is the deepest level at which the full
/// extent still fits within two tile-widths, floored at [`MIN_ZOOM`] and
/// never above the maximum.
pub fn zoom_range(bounds: &GeoBounds, dims: Dimensions) -> ZoomRange {
    let latitude = bounds.center_latitude();
    let native = native_resolution(bounds, dims);

    let mut max = 0u8;
    for zoom in 0..=MAX_ZOOM {
        if zoom_resolution(zoom, latitude) >= native / 2.0 {
            max = zoom;
        }
    }

    let (width_m, height_m) = ground_extent_m(bounds);
    let extent_m = width_m.max(height_m);

    let mut fit = 0u8;
    for zoom in 0..=max {
        let two_tiles_m = 2.0 * zoom_resolution(zoom, latitude) * TILE_SIZE as f64;
        if extent_m <= two_tiles_m {
            fit = zoom;
        }
    }

    let min = fit.max(MIN_ZOOM).min(max);
    ZoomRange { min, max }
}

/// Inclusive tile index ranges covering `bounds` at a zoom level
///
/// Returns `(x_min..=x_max, y_min..=y_max)` as a pair of tuples.
pub fn tile_range(bounds: &GeoBounds, zoom: u8) -> ((u32, u32), (u32, u32)) {
    let x_min = lon_to_tile_x(bounds.west, zoom);
    let x_max = lon_to_tile_x(bounds.east, zoom);
    let y_min = lat_to_tile_y(bounds.north, zoom);
    let y_max = lat_to_tile_y(bounds.south, zoom);
    ((x_min, x_max), (y_min, y_max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_zero_covers_world() {
        let bounds = TileCoordinate::new(0, 0, 0).bounds();
        assert!((bounds.west - (-180.0)).abs() < 1e-9);
        assert!((bounds.east - 180.0).abs() < 1e-9);
        assert!((bounds.north - 85.0511287798).abs() < 1e-6);
        assert!((bounds.south + 85.0511287798).abs() < 1e-6);
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let a = TileCoordinate::new(5, 16, 10).bounds();
        let b = TileCoordinate::new(5, 17, 10).bounds();
        let below = TileCoordinate::new(5, 16, 11).bounds();
        assert!((a.east - b.west).abs() < 1e-12);
        assert!((a.south - below.north).abs() < 1e-9);
    }

    #[test]
    fn test_tile_index_roundtrip() {
        let zoom = 15;
        let tile_x = lon_to_tile_x(11.5432, zoom);
        let tile_y = lat_to_tile_y(47.2692, zoom);
        let tile = TileCoordinate::new(zoom, tile_x, tile_y);
        let bounds = tile.bounds();
        assert!(bounds.west <= 11.5432 && 11.5432 < bounds.east);
        assert!(bounds.south <= 47.2692 && 47.2692 < bounds.north);
    }

    #[test]
    fn test_zoom_resolution_halves_per_level() {
        let r10 = zoom_resolution(10, 0.0);
        let r11 = zoom_resolution(11, 0.0);
        assert!((r10 / r11 - 2.0).abs() < 1e-12);
        assert!((zoom_resolution(0, 0.0) - 156_543.033_928).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_range_for_survey_raster() {
        // 100m x 100m at 2 cm/px, centered at 47N: 5000x5000 px.
        let half_lon = 50.0 / (METERS_PER_DEGREE * 47.0_f64.to_radians().cos());
        let half_lat = 50.0 / METERS_PER_DEGREE;
        let bounds = GeoBounds::new(11.5 - half_lon, 47.0 - half_lat, 11.5 + half_lon, 47.0 + half_lat);
        let dims = Dimensions::new(5000, 5000);

        let native = native_resolution(&bounds, dims);
        assert!((native - 0.02).abs() < 0.001);

        let range = zoom_range(&bounds, dims);
        assert!(range.min >= MIN_ZOOM);
        assert!(range.max <= MAX_ZOOM);
        assert!(range.min <= range.max);

        // Stable across repeated runs
        assert_eq!(range, zoom_range(&bounds, dims));

        // 2 cm/px at 47N sits past the zoom-22 resolution, so the ceiling
        // applies.
        assert_eq!(range.max, MAX_ZOOM);
    }

    #[test]
    fn test_zoom_range_coarse_raster_below_ceiling() {
        // ~1 km x 1 km at 1 m/px.
        let half_lon = 500.0 / (METERS_PER_DEGREE * 47.0_f64.to_radians().cos());
        let half_lat = 500.0 / METERS_PER_DEGREE;
        let bounds = GeoBounds::new(11.5 - half_lon, 47.0 - half_lat, 11.5 + half_lon, 47.0 + half_lat);
        let dims = Dimensions::new(1000, 1000);

        let range = zoom_range(&bounds, dims);
        assert!(range.max < MAX_ZOOM);
        // 1 m/px at 47N: zoom 17 is ~0.815 m/px, within the 2x tolerance;
        // zoom 18 (~0.407 m/px) is not.
        assert_eq!(range.max, 17);
    }

    #[test]
    fn test_tile_range_covers_bounds() {
        let bounds = GeoBounds::new(11.54, 47.26, 11.56, 47.28);
        let ((x_min, x_max), (y_min, y_max)) = tile_range(&bounds, 14);
        assert!(x_min <= x_max);
        assert!(y_min <= y_max);

        let north_west = TileCoordinate::new(14, x_min, y_min).bounds();
        let south_east = TileCoordinate::new(14, x_max, y_max).bounds();
        assert!(north_west.west <= bounds.west);
        assert!(north_west.north >= bounds.north);
        assert!(south_east.east >= bounds.east);
        assert!(south_east.south <= bounds.south);
    }
}
