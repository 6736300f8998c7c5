//! Reprojection of raster bounding boxes into geodetic WGS84

use std::f64::consts::PI;

use log::warn;
use proj::Proj;

use crate::error::{Error, Result};
use crate::projection::epsg;
use crate::types::{GeoBounds, ProjectedBounds};

/// Earth radius in meters used by the spherical Mercator projection
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// How a CRS code is handled by [`reproject`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsKind {
    /// Already geodetic, nothing to do
    Geodetic,
    /// UTM zone (number, southern hemisphere)
    Utm(u8, bool),
    /// Spherical Web Mercator
    WebMercator,
    /// Unknown code, bounds pass through unreliably
    Unknown(u16),
}

impl CrsKind {
    /// Classifies an optional EPSG code
    ///
    /// An absent code is treated as already geodetic.
    pub fn from_code(code: Option<u16>) -> Self {
        match code {
            None => CrsKind::Geodetic,
            Some(c) if c == epsg::WGS84 => CrsKind::Geodetic,
            Some(c) if c == epsg::WEB_MERCATOR => CrsKind::WebMercator,
            Some(c) => match epsg::utm_zone(c) {
                Some((zone, south)) => CrsKind::Utm(zone, south),
                None => CrsKind::Unknown(c),
            },
        }
    }
}

/// Result of reprojecting a raster bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reprojection {
    pub bounds: GeoBounds,
    /// `false` when the CRS was unrecognized and the raw values passed
    /// through untransformed
    pub reliable: bool,
}

/// Reprojects a raster's native bounding box into geodetic WGS84
///
/// Supported inputs: EPSG:4326 (identity), the two UTM/WGS84 bands
/// (32601-32660 north, 32701-32760 south) and EPSG:3857. For any other code
/// the raw values are returned unchanged with `reliable = false`; callers
/// must not trust such bounds.
///
/// Each call builds its own transform, so reprojection is safe to run
/// concurrently across many orthophotos.
pub fn reproject(bounds: ProjectedBounds, crs_code: Option<u16>) -> Result<Reprojection> {
    match CrsKind::from_code(crs_code) {
        CrsKind::Geodetic => Ok(Reprojection {
            bounds: GeoBounds::new(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y),
            reliable: true,
        }),
        CrsKind::Utm(zone, south) => {
            let bounds = reproject_utm(bounds, zone, south)?;
            Ok(Reprojection { bounds, reliable: true })
        }
        CrsKind::WebMercator => {
            let (west, south) = web_mercator_to_wgs84(bounds.min_x, bounds.min_y);
            let (east, north) = web_mercator_to_wgs84(bounds.max_x, bounds.max_y);
            Ok(Reprojection {
                bounds: GeoBounds::new(west, south, east, north),
                reliable: true,
            })
        }
        CrsKind::Unknown(code) => {
            warn!(
                "Unsupported CRS EPSG:{}, returning bounds untransformed",
                code
            );
            Ok(Reprojection {
                bounds: GeoBounds::new(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y),
                reliable: false,
            })
        }
    }
}

/// Transforms the SW and NE corners of a UTM box independently and
/// reassembles west/south/east/north from the results
fn reproject_utm(bounds: ProjectedBounds, zone: u8, south: bool) -> Result<GeoBounds> {
    let definition = epsg::utm_crs_definition(zone, south);
    let to = format!("EPSG:{}", epsg::WGS84);

    let transform = Proj::new_known_crs(&definition, &to, None)
        .map_err(|e| Error::Projection(format!("Failed to create UTM transform: {}", e)))?;

    let (west, south_deg) = transform
        .convert((bounds.min_x, bounds.min_y))
        .map_err(|e| Error::Projection(format!("UTM corner transform failed: {}", e)))?;
    let (east, north_deg) = transform
        .convert((bounds.max_x, bounds.max_y))
        .map_err(|e| Error::Projection(format!("UTM corner transform failed: {}", e)))?;

    Ok(GeoBounds::new(west, south_deg, east, north_deg))
}

/// Standard spherical Mercator inverse: meters to degrees
pub fn web_mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x * 180.0) / (EARTH_RADIUS_M * PI);
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0) * 180.0 / PI;
    (lon, lat)
}

/// Standard spherical Mercator forward: degrees to meters
///
/// Latitude is constrained to the Web Mercator domain (about +/-85.06).
pub fn wgs84_to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-85.06, 85.06);
    let x = lon * PI * EARTH_RADIUS_M / 180.0;
    let y = EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}
