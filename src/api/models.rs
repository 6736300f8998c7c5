use serde::{Deserialize, Serialize};

use crate::types::{GpsDetection, GroundCoordinate, PixelCoordinate};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BoundsResponse {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

#[derive(Debug, Deserialize)]
pub struct GeoreferenceRequest {
    #[serde(flatten)]
    pub metadata: crate::georef::RawCameraMetadata,
    /// Pixels to map to ground coordinates
    #[serde(default)]
    pub pixels: Vec<PixelCoordinate>,
}

#[derive(Debug, Serialize)]
pub struct GeoreferenceResponse {
    pub gsd_x: f64,
    pub gsd_y: f64,
    pub footprint_width_m: f64,
    pub footprint_height_m: f64,
    /// Fallback altitude or focal length was substituted; treat distances
    /// as low-confidence
    pub approximate: bool,
    pub nadir: bool,
    pub footprint_corners: Vec<GroundCoordinate>,
    pub ground_coordinates: Vec<GroundCoordinate>,
}

#[derive(Debug, Deserialize)]
pub struct DeduplicateRequest {
    pub detections: Vec<GpsDetection>,
    #[serde(default = "default_threshold_m")]
    pub threshold_m: f64,
}

fn default_threshold_m() -> f64 {
    0.5
}

#[derive(Debug, Serialize)]
pub struct DeduplicateResponse {
    pub total: usize,
    pub suppressed: usize,
    pub suppressed_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
