use std::fs;
use std::path::PathBuf;
use std::process;

use orthomapper::tiles::encode_png;
use orthomapper::{generate_tiles, reproject, Error, ProjectedBounds, Result};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 7 {
        eprintln!(
            "Usage: {} <raster> <min_x> <min_y> <max_x> <max_y> <out_dir> [epsg]",
            args[0]
        );
        eprintln!();
        eprintln!("Writes a slippy-map tile pyramid to <out_dir>/{{z}}/{{x}}/{{y}}.png.");
        eprintln!("Bounds are geodetic unless an EPSG code is given.");
        process::exit(2);
    }

    let raster_path = &args[1];
    let bounds = ProjectedBounds::new(
        parse_f64(&args[2], "min_x")?,
        parse_f64(&args[3], "min_y")?,
        parse_f64(&args[4], "max_x")?,
        parse_f64(&args[5], "max_y")?,
    );
    let out_dir = PathBuf::from(&args[6]);
    let epsg: Option<u16> = match args.get(7) {
        Some(raw) => Some(raw.parse().map_err(|_| {
            Error::InvalidInput(format!("invalid EPSG code: {}", raw))
        })?),
        None => None,
    };

    println!("orthomapper - tile pyramid generation\n");

    let raster = image::open(raster_path)
        .map_err(|e| Error::InvalidInput(format!("failed to decode {}: {}", raster_path, e)))?
        .to_rgba8();
    println!("Raster: {} ({} x {})", raster_path, raster.width(), raster.height());

    let reprojected = reproject(bounds, epsg)?;
    if !reprojected.reliable {
        eprintln!("Warning: CRS not recognized, bounds used untransformed");
    }
    let geo = reprojected.bounds;
    println!(
        "Bounds: west={:.6} south={:.6} east={:.6} north={:.6}",
        geo.west, geo.south, geo.east, geo.north
    );

    let pyramid = generate_tiles(&raster, geo)?;

    for level in &pyramid.levels {
        for tile in &level.tiles {
            let dir = out_dir
                .join(tile.coord.zoom.to_string())
                .join(tile.coord.x.to_string());
            fs::create_dir_all(&dir)?;
            fs::write(dir.join(format!("{}.png", tile.coord.y)), encode_png(&tile.image)?)?;
        }
        println!("  zoom {:2}: {} tiles", level.zoom, level.tiles.len());
    }

    println!("\nWrote {} tiles to {}", pyramid.tile_count(), out_dir.display());
    Ok(())
}

fn parse_f64(raw: &str, name: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| Error::InvalidInput(format!("invalid {}: {}", name, raw)))
}
