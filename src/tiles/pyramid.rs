//! Tile pyramid generation from a decoded orthophoto

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use log::{debug, warn};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::tiles::grid::{self, TileCoordinate, TILE_SIZE};
use crate::types::{Dimensions, GeoBounds};

/// A rendered map tile
#[derive(Debug, Clone)]
pub struct Tile {
    pub coord: TileCoordinate,
    /// 256x256 RGBA pixel buffer
    pub image: RgbaImage,
}

/// All tiles of one zoom level
#[derive(Debug, Clone)]
pub struct ZoomLevel {
    pub zoom: u8,
    pub tiles: Vec<Tile>,
}

/// A full tile pyramid, grouped by zoom level
///
/// Levels are ordered from the minimum zoom to the maximum so a caller can
/// persist coarse levels first.
#[derive(Debug, Clone)]
pub struct TilePyramid {
    pub levels: Vec<ZoomLevel>,
}

impl TilePyramid {
    /// Total number of tiles across all levels
    pub fn tile_count(&self) -> usize {
        self.levels.iter().map(|level| level.tiles.len()).sum()
    }
}

/// Generates the tile pyramid for an orthophoto
///
/// `bounds` must already be geodetic; projected bounds are rejected with
/// [`Error::InvalidBounds`]. Tiles within one zoom level are rendered in
/// parallel against the shared read-only raster. A failing tile is logged
/// and skipped; it never aborts the rest of the pyramid.
pub fn generate_tiles(raster: &RgbaImage, bounds: GeoBounds) -> Result<TilePyramid> {
    if !bounds.is_geodetic() {
        return Err(Error::InvalidBounds(format!(
            "not geodetic: west={} south={} east={} north={}",
            bounds.west, bounds.south, bounds.east, bounds.north
        )));
    }

    let dims = Dimensions::new(raster.width(), raster.height());
    if dims.pixel_count() == 0 {
        return Err(Error::InvalidInput("raster has no pixels".to_string()));
    }
    let range = grid::zoom_range(&bounds, dims);

    let mut levels = Vec::new();
    for zoom in range.levels() {
        let ((x_min, x_max), (y_min, y_max)) = grid::tile_range(&bounds, zoom);

        let coords: Vec<TileCoordinate> = (y_min..=y_max)
            .flat_map(|y| (x_min..=x_max).map(move |x| TileCoordinate::new(zoom, x, y)))
            .collect();

        let tiles: Vec<Tile> = coords
            .par_iter()
            .filter_map(|&coord| match render_tile(raster, &bounds, coord) {
                Ok(Some(image)) => Some(Tile { coord, image }),
                Ok(None) => None,
                Err(e) => {
                    warn!(
                        "Skipping tile {}/{}/{}: {}",
                        coord.zoom, coord.x, coord.y, e
                    );
                    None
                }
            })
            .collect();

        debug!("Zoom {}: rendered {} tiles", zoom, tiles.len());
        levels.push(ZoomLevel { zoom, tiles });
    }

    Ok(TilePyramid { levels })
}

/// Renders a single 256x256 RGBA tile from the orthophoto
///
/// Returns `Ok(None)` when the tile's clamped source rectangle is empty,
/// which happens for tiles that intersect the naive bounding box but not the
/// raster's actual coverage. Areas of the tile outside the raster stay
/// fully transparent.
pub fn render_tile(
    raster: &RgbaImage,
    bounds: &GeoBounds,
    coord: TileCoordinate,
) -> Result<Option<RgbaImage>> {
    let raster_w = raster.width() as f64;
    let raster_h = raster.height() as f64;
    let tile_bounds = coord.bounds();

    // Tile corners in source-pixel space, by linear interpolation against
    // the raster's bounds.
    let src_x0 = (tile_bounds.west - bounds.west) / bounds.width() * raster_w;
    let src_x1 = (tile_bounds.east - bounds.west) / bounds.width() * raster_w;
    let src_y0 = (bounds.north - tile_bounds.north) / bounds.height() * raster_h;
    let src_y1 = (bounds.north - tile_bounds.south) / bounds.height() * raster_h;

    // Clamp to the raster's actual extent.
    let clamp_x0 = src_x0.max(0.0);
    let clamp_x1 = src_x1.min(raster_w);
    let clamp_y0 = src_y0.max(0.0);
    let clamp_y1 = src_y1.min(raster_h);

    if clamp_x1 - clamp_x0 <= 0.0 || clamp_y1 - clamp_y0 <= 0.0 {
        return Ok(None);
    }

    let crop_left = clamp_x0.floor() as u32;
    let crop_top = clamp_y0.floor() as u32;
    let crop_w = (clamp_x1.ceil() as u32).min(raster.width()) - crop_left;
    let crop_h = (clamp_y1.ceil() as u32).min(raster.height()) - crop_top;
    if crop_w == 0 || crop_h == 0 {
        return Ok(None);
    }

    // Destination rectangle within the tile for the clamped source area.
    let tile_px = TILE_SIZE as f64;
    let dest_x0 = ((clamp_x0 - src_x0) / (src_x1 - src_x0) * tile_px).round() as u32;
    let dest_y0 = ((clamp_y0 - src_y0) / (src_y1 - src_y0) * tile_px).round() as u32;
    let dest_x1 = ((clamp_x1 - src_x0) / (src_x1 - src_x0) * tile_px).round() as u32;
    let dest_y1 = ((clamp_y1 - src_y0) / (src_y1 - src_y0) * tile_px).round() as u32;

    let dest_x0 = dest_x0.min(TILE_SIZE - 1);
    let dest_y0 = dest_y0.min(TILE_SIZE - 1);
    let dest_w = (dest_x1.max(dest_x0 + 1) - dest_x0).min(TILE_SIZE - dest_x0);
    let dest_h = (dest_y1.max(dest_y0 + 1) - dest_y0).min(TILE_SIZE - dest_y0);

    if crop_left + crop_w > raster.width() || crop_top + crop_h > raster.height() {
        return Err(Error::TileRender(format!(
            "source rect {}x{}+{}+{} outside raster {}x{}",
            crop_w,
            crop_h,
            crop_left,
            crop_top,
            raster.width(),
            raster.height()
        )));
    }

    let cropped = imageops::crop_imm(raster, crop_left, crop_top, crop_w, crop_h).to_image();
    let resized = imageops::resize(&cropped, dest_w, dest_h, FilterType::Triangle);

    if dest_w == TILE_SIZE && dest_h == TILE_SIZE {
        return Ok(Some(resized));
    }

    // Raster bounds rarely align to tile edges; composite the covered part
    // onto a transparent background.
    let mut tile = RgbaImage::new(TILE_SIZE, TILE_SIZE);
    imageops::overlay(&mut tile, &resized, dest_x0 as i64, dest_y0 as i64);
    Ok(Some(tile))
}

/// Encodes a tile buffer as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| Error::TileRender(format!("PNG encode failed: {}", e)))?;
    Ok(bytes)
}
