use std::process;

use orthomapper::api::{create_router, AppState};
use orthomapper::{reproject, ProjectedBounds};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 6 {
        eprintln!(
            "Usage: {} <raster> <min_x> <min_y> <max_x> <max_y> [epsg] [port]",
            args[0]
        );
        process::exit(2);
    }

    let raster = match image::open(&args[1]) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            eprintln!("Failed to decode {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let bounds = ProjectedBounds::new(
        parse_or_exit(&args[2]),
        parse_or_exit(&args[3]),
        parse_or_exit(&args[4]),
        parse_or_exit(&args[5]),
    );
    let epsg: Option<u16> = args.get(6).map(|raw| parse_or_exit(raw));
    let port: u16 = args.get(7).map(|raw| parse_or_exit(raw)).unwrap_or(3000);

    let reprojected = match reproject(bounds, epsg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Reprojection failed: {}", e);
            process::exit(1);
        }
    };
    if !reprojected.reliable {
        eprintln!("Warning: CRS not recognized, bounds used untransformed");
    }

    let app = create_router(AppState::new(raster, reprojected.bounds));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind port");

    println!("Orthophoto Tile API Server");
    println!("Listening on http://0.0.0.0:{}", port);
    println!();
    println!("Endpoints:");
    println!("  GET  /health");
    println!("  GET  /api/bounds");
    println!("  GET  /tiles/{{z}}/{{x}}/{{y}}.png");
    println!("  POST /api/georeference");
    println!("  POST /api/deduplicate");
    println!();

    axum::serve(listener, app).await.expect("Server error");
}

fn parse_or_exit<T: std::str::FromStr>(raw: &str) -> T {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid argument: {}", raw);
        process::exit(2);
    })
}
