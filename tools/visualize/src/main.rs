//! Diagnostic visualizer: renders the classified height, heat and moisture
//! fields of a tile grid through their band gradients into PNGs.
//! Neighbouring tiles overlap by their shared edge, so seams show up as
//! visible discontinuities if the noise ever stops lining up.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tile_core::{TerrainVisualization, TileConfig, TileGenerator, TileResult, WorldOffset};

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Write classified tile-grid PNGs")]
struct Args {
    /// JSON tile configuration. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Grid is `size × size` tiles.
    #[arg(short, long, default_value_t = 4)]
    size: u32,

    /// Output directory.
    #[arg(short, long, default_value = "data/debug")]
    output: String,
}

/// Stitch per-tile texels into one image. Tiles advance by `texels − 1` so
/// their shared edge lands on the same pixel.
fn stitch(
    tiles: &[TileResult],
    config: &TileConfig,
    kind: TerrainVisualization,
    size: u32,
) -> Result<image::RgbaImage> {
    let texels = match kind {
        TerrainVisualization::Height => config.sample_size * config.texture_resolution,
        TerrainVisualization::Heat | TerrainVisualization::Moisture => config.sample_size,
    };
    let stride = (texels - 1) as u32;
    let side = stride * size + 1;
    let mut img = image::RgbaImage::new(side, side);

    for tile in tiles {
        let colors = tile.colors(config, kind)?;
        let base_x = tile.grid.tile_x as u32 * stride;
        let base_y = tile.grid.tile_z as u32 * stride;
        for x in 0..texels {
            for z in 0..texels {
                let px = image::Rgba(colors[x * texels + z]);
                img.put_pixel(base_x + x as u32, base_y + z as u32, px);
            }
        }
    }
    Ok(img)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(p) => {
            let json = fs::read_to_string(p).with_context(|| format!("reading config {p}"))?;
            TileConfig::from_json(&json).with_context(|| format!("parsing config {p}"))?
        }
        None => TileConfig::default(),
    };
    let generator = TileGenerator::new(config)?;

    println!("Generating {0}×{0} tiles…", args.size);
    let tiles = generator.generate_grid(args.size, args.size, WorldOffset::ZERO)?;

    let out_dir = Path::new(&args.output);
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    for (kind, name) in [
        (TerrainVisualization::Height, "height_classes.png"),
        (TerrainVisualization::Heat, "heat_classes.png"),
        (TerrainVisualization::Moisture, "moisture_classes.png"),
    ] {
        let img = stitch(&tiles, generator.config(), kind, args.size)?;
        let path = out_dir.join(name);
        img.save(&path).with_context(|| format!("saving {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("Done.");
    Ok(())
}
