use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use axum::body::Body;
use image::RgbaImage;
use log::debug;

use crate::error::Error;
use crate::georef::{self, DroneImageMetadata, NADIR_TOLERANCE_DEG};
use crate::tiles::grid::TileCoordinate;
use crate::tiles::{encode_png, render_tile, TILE_SIZE};

use super::models::*;
use super::routes::AppState;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_bounds(State(state): State<Arc<AppState>>) -> Json<BoundsResponse> {
    Json(BoundsResponse {
        west: state.bounds.west,
        south: state.bounds.south,
        east: state.bounds.east,
        north: state.bounds.north,
    })
}

/// Serves one slippy-map tile, rendering lazily through the cache
pub async fn get_tile(
    State(state): State<Arc<AppState>>,
    Path((zoom, x, y)): Path<(u8, u32, String)>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let y: u32 = y
        .strip_suffix(".png")
        .unwrap_or(&y)
        .parse()
        .map_err(|_| bad_request("invalid tile row"))?;

    let extent = 1u64 << zoom.min(63);
    if zoom > crate::tiles::grid::MAX_ZOOM || x as u64 >= extent || y as u64 >= extent {
        return Err(bad_request("tile coordinate out of range"));
    }

    let coord = TileCoordinate::new(zoom, x, y);

    if let Some(payload) = state.cache.get(&coord) {
        debug!("Tile {}/{}/{} served from cache", zoom, x, y);
        return Ok(png_response(payload.to_vec()));
    }

    let image = render_tile(&state.raster, &state.bounds, coord)
        .map_err(internal_error)?
        // Off-coverage tiles come back fully transparent so map clients
        // keep panning smoothly past the orthophoto edge.
        .unwrap_or_else(|| RgbaImage::new(TILE_SIZE, TILE_SIZE));

    let payload = encode_png(&image).map_err(internal_error)?;
    state.cache.put(coord, payload.clone());

    Ok(png_response(payload))
}

pub async fn georeference(
    Json(req): Json<GeoreferenceRequest>,
) -> Result<Json<GeoreferenceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let meta = DroneImageMetadata::derive(&req.metadata).map_err(|e| match e {
        Error::MissingGps => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ),
        other => bad_request(&other.to_string()),
    })?;

    let ground_coordinates = req
        .pixels
        .iter()
        .map(|&pixel| georef::pixel_to_ground(pixel, &meta))
        .collect();

    Ok(Json(GeoreferenceResponse {
        gsd_x: meta.gsd_x,
        gsd_y: meta.gsd_y,
        footprint_width_m: meta.footprint_width_m,
        footprint_height_m: meta.footprint_height_m,
        approximate: meta.approximate,
        nadir: georef::is_nadir(&meta, NADIR_TOLERANCE_DEG),
        footprint_corners: georef::footprint_corners(&meta).to_vec(),
        ground_coordinates,
    }))
}

pub async fn deduplicate(
    Json(req): Json<DeduplicateRequest>,
) -> Result<Json<DeduplicateResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !(req.threshold_m > 0.0) {
        return Err(bad_request("threshold_m must be positive"));
    }

    let suppressed = crate::dedup::suppress(&req.detections, req.threshold_m);

    let mut suppressed_ids: Vec<String> = suppressed.into_iter().collect();
    suppressed_ids.sort();

    Ok(Json(DeduplicateResponse {
        total: req.detections.len(),
        suppressed: suppressed_ids.len(),
        suppressed_ids,
    }))
}

fn png_response(payload: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::IMAGE_PNG.as_ref())
        .body(Body::from(payload))
        .unwrap()
}

fn bad_request(msg: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
}

fn internal_error(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
