//! Slippy-map tile pyramid generation
//!
//! Turns a decoded orthophoto plus its geodetic bounds into fixed-size
//! 256x256 RGBA tiles addressed by `(zoom, x, y)`.

pub mod grid;
pub mod pyramid;

pub use grid::{TileCoordinate, ZoomRange, TILE_SIZE};
pub use pyramid::{encode_png, generate_tiles, render_tile, Tile, TilePyramid, ZoomLevel};
