//! Pixel/ground coordinate mapping for a single drone image
//!
//! Uses a local flat-earth approximation (111,320 m per degree of latitude,
//! longitude scaled by cos of latitude). Valid only over a single image
//! footprint; never use these functions for long-range conversion.

use crate::georef::metadata::DroneImageMetadata;
use crate::tiles::grid::METERS_PER_DEGREE;
use crate::types::{GroundCoordinate, PixelCoordinate};

/// Gimbal pitch tolerance around straight-down, in degrees
pub const NADIR_TOLERANCE_DEG: f64 = 10.0;

/// Maps an image pixel to a ground coordinate
///
/// The pixel's offset from image center is converted to meters via the GSD,
/// rotated by gimbal yaw when known (0 degrees means image-top is north),
/// then applied to the camera position in flat-earth degrees.
pub fn pixel_to_ground(pixel: PixelCoordinate, meta: &DroneImageMetadata) -> GroundCoordinate {
    let center_x = meta.image_width_px as f64 / 2.0;
    let center_y = meta.image_height_px as f64 / 2.0;

    let east_m = (pixel.x - center_x) * meta.gsd_x;
    // Image y grows downward, north grows upward.
    let north_m = (center_y - pixel.y) * meta.gsd_y;

    let (east_m, north_m) = match meta.gimbal_yaw_deg {
        Some(yaw) if yaw != 0.0 => rotate_by_yaw(east_m, north_m, yaw),
        _ => (east_m, north_m),
    };

    let latitude = meta.latitude + north_m / METERS_PER_DEGREE;
    let longitude =
        meta.longitude + east_m / (METERS_PER_DEGREE * meta.latitude.to_radians().cos());

    GroundCoordinate {
        latitude,
        longitude,
        distance_from_center: (east_m * east_m + north_m * north_m).sqrt(),
    }
}

/// Maps a ground coordinate back to an image pixel
///
/// Algebraic inverse of [`pixel_to_ground`] except that the gimbal-yaw
/// rotation is not undone, matching the source system; the two functions are
/// exact inverses only when yaw is zero or unknown.
pub fn ground_to_pixel(ground: GroundCoordinate, meta: &DroneImageMetadata) -> PixelCoordinate {
    let north_m = (ground.latitude - meta.latitude) * METERS_PER_DEGREE;
    let east_m = (ground.longitude - meta.longitude)
        * METERS_PER_DEGREE
        * meta.latitude.to_radians().cos();

    let center_x = meta.image_width_px as f64 / 2.0;
    let center_y = meta.image_height_px as f64 / 2.0;

    PixelCoordinate {
        x: center_x + east_m / meta.gsd_x,
        y: center_y - north_m / meta.gsd_y,
    }
}

/// Ground coordinates of the four image corners
///
/// Order: top-left, top-right, bottom-right, bottom-left in image space.
pub fn footprint_corners(meta: &DroneImageMetadata) -> [GroundCoordinate; 4] {
    let w = meta.image_width_px as f64;
    let h = meta.image_height_px as f64;

    [
        pixel_to_ground(PixelCoordinate::new(0.0, 0.0), meta),
        pixel_to_ground(PixelCoordinate::new(w, 0.0), meta),
        pixel_to_ground(PixelCoordinate::new(w, h), meta),
        pixel_to_ground(PixelCoordinate::new(0.0, h), meta),
    ]
}

/// Whether the image was captured pointing straight down
///
/// Unknown pitch defaults to nadir; almost all survey images are.
pub fn is_nadir(meta: &DroneImageMetadata, tolerance_deg: f64) -> bool {
    match meta.gimbal_pitch_deg {
        Some(pitch) => (pitch - (-90.0)).abs() <= tolerance_deg,
        None => true,
    }
}

/// Rotates a meter offset clockwise by the gimbal yaw angle
fn rotate_by_yaw(east_m: f64, north_m: f64, yaw_deg: f64) -> (f64, f64) {
    let yaw = yaw_deg.to_radians();
    let (sin, cos) = yaw.sin_cos();
    (
        east_m * cos + north_m * sin,
        north_m * cos - east_m * sin,
    )
}
