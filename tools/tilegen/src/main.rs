//! Tile generation CLI: builds one tile or a whole grid from a JSON config
//! and reports how each classified field splits across its bands.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tile_core::{
    Band, DiscreteField, GridContext, TerrainVisualization, TileConfig, TileGenerator, TileResult,
    WorldOffset,
};

#[derive(Parser, Debug)]
#[command(name = "tilegen", about = "Generate terrain tiles and summarise their classification")]
struct Args {
    /// JSON tile configuration. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Tile column index.
    #[arg(short = 'x', long, default_value_t = 0)]
    tile_x: i32,

    /// Tile row index.
    #[arg(short = 'z', long, default_value_t = 0)]
    tile_z: i32,

    /// Tiles per grid row (drives the equator position).
    #[arg(long, default_value_t = 1)]
    columns: u32,

    /// Generate every tile of a `columns × rows` grid instead of a single tile.
    #[arg(long)]
    rows: Option<u32>,

    /// Noise-space position of the grid origin.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    origin_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    origin_y: f64,

    /// Write the generated tiles as JSON to this path.
    #[arg(short, long)]
    output: Option<String>,

    /// Print the default configuration as JSON and exit.
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: Option<&str>) -> Result<TileConfig> {
    match path {
        Some(p) => {
            let json = fs::read_to_string(p).with_context(|| format!("reading config {p}"))?;
            TileConfig::from_json(&json).with_context(|| format!("parsing config {p}"))
        }
        None => Ok(TileConfig::default()),
    }
}

fn print_coverage(name: &str, classes: &DiscreteField, bands: &[Band]) {
    let parts: Vec<String> = classes
        .coverage(bands)
        .into_iter()
        .map(|(label, frac)| format!("{label} {:>5.1}%", frac * 100.0))
        .collect();
    eprintln!("  {name:<9} {}", parts.join("  "));
}

fn summarise(tile: &TileResult, config: &TileConfig) {
    eprintln!(
        "tile ({}, {}) height [{:.3}, {:.3}]  heat [{:.3}, {:.3}]  moisture [{:.3}, {:.3}]",
        tile.grid.tile_x,
        tile.grid.tile_z,
        tile.height.min_value(),
        tile.height.max_value(),
        tile.heat.min_value(),
        tile.heat.max_value(),
        tile.moisture.min_value(),
        tile.moisture.max_value(),
    );
    for kind in [TerrainVisualization::Height, TerrainVisualization::Heat, TerrainVisualization::Moisture] {
        let (_, classes) = tile.visualized(kind);
        print_coverage(&format!("{kind:?}").to_lowercase(), classes, config.bands_for(kind));
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.print_default_config {
        println!("{}", TileConfig::default().to_json()?);
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let generator = TileGenerator::new(config).context("invalid tile configuration")?;
    let origin = WorldOffset::new(args.origin_x, args.origin_y);

    let tiles = match args.rows {
        Some(rows) => {
            info!("generating {}×{} grid", args.columns, rows);
            generator.generate_grid(args.columns, rows, origin)?
        }
        None => {
            let grid = GridContext::new(args.tile_x, args.tile_z, args.columns);
            vec![generator.generate(grid, origin)?]
        }
    };

    for tile in &tiles {
        summarise(tile, generator.config());
    }

    if let Some(out) = args.output {
        let json = serde_json::to_string(&tiles).context("serialising tiles")?;
        fs::write(Path::new(&out), json).with_context(|| format!("writing {out}"))?;
        eprintln!("Wrote {} tile(s) to {out}", tiles.len());
    }

    Ok(())
}
