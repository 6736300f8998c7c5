//! Derivation of per-image georeferencing metadata

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::georef::sensors::{self, DEFAULT_SENSOR, FULL_FRAME};

/// Altitude substituted when the metadata carries none, in meters
pub const DEFAULT_ALTITUDE_M: f64 = 50.0;

/// Focal length substituted when the metadata carries none, in millimeters
///
/// Chosen to pair with the generic 1/2.3" fallback sensor.
pub const DEFAULT_FOCAL_LENGTH_MM: f64 = 4.5;

/// Flat camera/GPS field set extracted from one image's EXIF/XMP
///
/// Every field is optional; [`DroneImageMetadata::derive`] decides which
/// absences are fatal and which degrade the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCameraMetadata {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Altitude above ground, from the vendor's relative-altitude tag
    pub relative_altitude_m: Option<f64>,
    /// GPS (absolute) altitude, used only when no relative altitude exists
    pub absolute_altitude_m: Option<f64>,
    pub focal_length_mm: Option<f64>,
    pub focal_length_35mm: Option<f64>,
    pub image_width_px: Option<u32>,
    pub image_height_px: Option<u32>,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub gimbal_pitch_deg: Option<f64>,
    pub gimbal_yaw_deg: Option<f64>,
    pub gimbal_roll_deg: Option<f64>,
    pub captured_at: Option<String>,
}

/// Georeferencing state of one source image at capture time
///
/// A pure function of the raw EXIF/XMP fields plus the sensor lookup table;
/// the GSD and footprint fields are always derived, never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneImageMetadata {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude above ground in meters
    pub altitude_m: f64,
    /// True when a fallback altitude or focal length was substituted;
    /// derived distances are low-confidence in that case
    pub approximate: bool,
    pub focal_length_mm: f64,
    pub sensor_width_mm: f64,
    pub sensor_height_mm: f64,
    pub image_width_px: u32,
    pub image_height_px: u32,
    pub gimbal_pitch_deg: Option<f64>,
    pub gimbal_yaw_deg: Option<f64>,
    pub gimbal_roll_deg: Option<f64>,
    pub captured_at: Option<String>,
    /// Ground sample distance along the image X axis, meters per pixel
    pub gsd_x: f64,
    /// Ground sample distance along the image Y axis, meters per pixel
    pub gsd_y: f64,
    /// Ground footprint width of the full image, meters
    pub footprint_width_m: f64,
    /// Ground footprint height of the full image, meters
    pub footprint_height_m: f64,
}

impl DroneImageMetadata {
    /// Derives georeferencing metadata from raw camera fields
    ///
    /// Fails with [`Error::MissingGps`] when no position is present; that
    /// image cannot be georeferenced. Missing altitude or focal length fall
    /// back to defaults and mark the result approximate.
    pub fn derive(raw: &RawCameraMetadata) -> Result<Self> {
        let (latitude, longitude) = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Err(Error::MissingGps),
        };

        let mut approximate = false;

        // Relative altitude wins over absolute; non-positive values are as
        // useless as missing ones.
        let altitude_m = match raw.relative_altitude_m.or(raw.absolute_altitude_m) {
            Some(alt) if alt > 0.0 => alt,
            _ => {
                approximate = true;
                DEFAULT_ALTITUDE_M
            }
        };

        let focal_length_mm = match raw.focal_length_mm {
            Some(f) if f > 0.0 => f,
            _ => {
                approximate = true;
                DEFAULT_FOCAL_LENGTH_MM
            }
        };

        // The 35mm-equivalent ratio beats the model table when present: it
        // reflects the actual lens rather than a catalogue entry.
        let sensor = match (raw.focal_length_mm, raw.focal_length_35mm) {
            (Some(f), Some(f35)) if f > 0.0 && f35 > 0.0 => sensors::SensorSize {
                width_mm: FULL_FRAME.width_mm * f / f35,
                height_mm: FULL_FRAME.height_mm * f / f35,
            },
            _ => raw
                .camera_model
                .as_deref()
                .and_then(sensors::lookup)
                .unwrap_or(DEFAULT_SENSOR),
        };

        let image_width_px = raw.image_width_px.ok_or_else(|| {
            Error::InvalidInput("missing image pixel width".to_string())
        })?;
        let image_height_px = raw.image_height_px.ok_or_else(|| {
            Error::InvalidInput("missing image pixel height".to_string())
        })?;
        if image_width_px == 0 || image_height_px == 0 {
            return Err(Error::InvalidInput("zero image dimensions".to_string()));
        }

        let gsd_x = altitude_m * sensor.width_mm / (focal_length_mm * image_width_px as f64);
        let gsd_y = altitude_m * sensor.height_mm / (focal_length_mm * image_height_px as f64);

        Ok(Self {
            latitude,
            longitude,
            altitude_m,
            approximate,
            focal_length_mm,
            sensor_width_mm: sensor.width_mm,
            sensor_height_mm: sensor.height_mm,
            image_width_px,
            image_height_px,
            gimbal_pitch_deg: raw.gimbal_pitch_deg,
            gimbal_yaw_deg: raw.gimbal_yaw_deg,
            gimbal_roll_deg: raw.gimbal_roll_deg,
            captured_at: raw.captured_at.clone(),
            gsd_x,
            gsd_y,
            footprint_width_m: gsd_x * image_width_px as f64,
            footprint_height_m: gsd_y * image_height_px as f64,
        })
    }
}
