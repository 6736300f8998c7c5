//! Coordinate reference system handling
//!
//! Orthophotos arrive with bounds in their native projected CRS (commonly a
//! UTM zone). This module reprojects those bounds into geodetic WGS84 for
//! tiling and persistence.

pub mod epsg;
pub mod reproject;

pub use reproject::{reproject, CrsKind, Reprojection};
