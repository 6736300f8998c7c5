use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use image::RgbaImage;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::cache::TileCache;
use crate::types::GeoBounds;

use super::handlers::*;

/// Shared state for one served orthophoto
///
/// The raster is read-only once loaded; the tile cache is the only mutable
/// member and carries its own locking.
pub struct AppState {
    pub raster: RgbaImage,
    pub bounds: GeoBounds,
    pub cache: TileCache,
}

impl AppState {
    pub fn new(raster: RgbaImage, bounds: GeoBounds) -> Self {
        Self {
            raster,
            bounds,
            cache: TileCache::default(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/bounds", get(get_bounds))
        .route("/tiles/:z/:x/:y", get(get_tile))
        .route("/api/georeference", post(georeference))
        .route("/api/deduplicate", post(deduplicate))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(Arc::new(state))
}
