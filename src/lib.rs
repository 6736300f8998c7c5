//! orthomapper - geospatial pipeline for drone plant surveys
//!
//! orthomapper takes a stitched orthophoto (plus its projected bounding box)
//! and the per-image camera metadata of a survey flight and produces geodetic
//! bounds, a slippy-map tile pyramid, per-pixel ground coordinates and a
//! deduplicated detection set.
//!
//! # Examples
//!
//! ## Reprojecting raster bounds and tiling
//!
//! ```no_run
//! use orthomapper::{reproject, generate_tiles, ProjectedBounds};
//!
//! let raster = image::open("orthophoto.png")?.to_rgba8();
//! let bounds = ProjectedBounds::new(681000.0, 5235000.0, 681150.0, 5235150.0);
//!
//! let reprojected = reproject(bounds, Some(32632))?;
//! let pyramid = generate_tiles(&raster, reprojected.bounds)?;
//!
//! for level in &pyramid.levels {
//!     println!("zoom {}: {} tiles", level.zoom, level.tiles.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Georeferencing a detection
//!
//! ```
//! use orthomapper::{DroneImageMetadata, RawCameraMetadata, PixelCoordinate};
//! use orthomapper::georef::pixel_to_ground;
//!
//! let raw = RawCameraMetadata {
//!     latitude: Some(47.26),
//!     longitude: Some(11.54),
//!     relative_altitude_m: Some(40.0),
//!     focal_length_mm: Some(8.8),
//!     image_width_px: Some(5472),
//!     image_height_px: Some(3648),
//!     camera_model: Some("FC6310".to_string()),
//!     ..Default::default()
//! };
//!
//! let meta = DroneImageMetadata::derive(&raw)?;
//! let ground = pixel_to_ground(PixelCoordinate::new(1000.0, 800.0), &meta);
//! println!("({}, {})", ground.latitude, ground.longitude);
//! # Ok::<(), orthomapper::Error>(())
//! ```

pub mod api;
pub mod cache;
pub mod dedup;
pub mod error;
pub mod georef;
pub mod projection;
pub mod tiles;
pub mod types;

pub use cache::{CacheStats, TileCache};
pub use dedup::{haversine_distance_m, suppress};
pub use error::{Error, Result};
pub use georef::{DroneImageMetadata, RawCameraMetadata};
pub use projection::{reproject, CrsKind, Reprojection};
pub use tiles::{generate_tiles, Tile, TileCoordinate, TilePyramid};
pub use types::{
    Dimensions, GeoBounds, GpsDetection, GroundCoordinate, PixelCoordinate, ProjectedBounds,
};
