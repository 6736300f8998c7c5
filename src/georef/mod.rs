//! Per-image georeferencing from drone camera metadata
//!
//! Derives ground-sample-distance and a pixel-to-ground mapping for a single
//! source image from its EXIF/XMP fields. Metadata extraction itself is an
//! external collaborator's job; this module only consumes the flat field set.

pub mod mapping;
pub mod metadata;
pub mod sensors;

pub use mapping::{footprint_corners, ground_to_pixel, is_nadir, pixel_to_ground, NADIR_TOLERANCE_DEG};
pub use metadata::{DroneImageMetadata, RawCameraMetadata};
