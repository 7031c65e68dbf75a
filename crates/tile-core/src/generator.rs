//! Tile pipeline: runs every generation stage for one tile or a whole grid.
//!
//! Pipeline:
//!   1. Height noise (mesh density and texture density)
//!   2. Curve-shaped displacement
//!   3. Heat: latitude gradient × heat noise + altitude
//!   4. Moisture: moisture noise − altitude drying
//!   5. Threshold classification of height, heat and moisture

use log::debug;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, DiscreteField};
use crate::climate::{combine_heat, combine_moisture, generate_uniform_field};
use crate::config::{TerrainVisualization, TileConfig};
use crate::displacement::displacement;
use crate::error::{Result, TileError};
use crate::field::ScalarField;
use crate::grid::GridContext;
use crate::noise::{generate_noise_field, WorldOffset};

// ── Single-field entry points ─────────────────────────────────────────────────

/// Height field at mesh density (`sample_size × sample_size`).
pub fn generate_height_field(config: &TileConfig, offset: WorldOffset) -> Result<ScalarField> {
    generate_noise_field(config.sample_size, config.scale, &config.waves, offset, 1)
}

/// Height field over the same span at `texture_resolution` times the density.
pub fn generate_detail_height_field(config: &TileConfig, offset: WorldOffset) -> Result<ScalarField> {
    generate_noise_field(
        config.sample_size,
        config.scale,
        &config.waves,
        offset,
        config.texture_resolution,
    )
}

/// Heat field for the tile at `grid`, blended from `height`.
pub fn generate_heat_field(
    config: &TileConfig,
    height: &ScalarField,
    offset: WorldOffset,
    grid: GridContext,
) -> Result<ScalarField> {
    grid.validate()?;
    let n = config.sample_size;
    let uniform = generate_uniform_field(
        n,
        grid.equator_distance(n),
        grid.pole_distance(n),
        config.latitude_falloff,
    )?;
    let random = generate_noise_field(n, config.scale, &config.heat_waves, offset, 1)?;
    combine_heat(height, &uniform, &random)
}

/// Moisture field, dried slightly by `height`.
pub fn generate_moisture_field(
    config: &TileConfig,
    height: &ScalarField,
    offset: WorldOffset,
) -> Result<ScalarField> {
    let random = generate_noise_field(config.sample_size, config.scale, &config.moisture_waves, offset, 1)?;
    combine_moisture(height, &random)
}

// ── Tile result ───────────────────────────────────────────────────────────────

/// Every field produced for one tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileResult {
    pub grid: GridContext,
    pub offset: WorldOffset,
    /// Mesh-density height, [0, 1].
    pub height: ScalarField,
    /// Texture-density height, [0, 1].
    pub detail_height: ScalarField,
    /// Vertex y values: `curve(height) · max_height`.
    pub displacement: ScalarField,
    /// [0, 0.99].
    pub heat: ScalarField,
    /// Unclamped.
    pub moisture: ScalarField,
    /// Classified from `detail_height`.
    pub height_classes: DiscreteField,
    pub heat_classes: DiscreteField,
    pub moisture_classes: DiscreteField,
}

impl TileResult {
    /// The continuous field and its classification for a visualization mode.
    pub fn visualized(&self, kind: TerrainVisualization) -> (&ScalarField, &DiscreteField) {
        match kind {
            TerrainVisualization::Height => (&self.detail_height, &self.height_classes),
            TerrainVisualization::Heat => (&self.heat, &self.heat_classes),
            TerrainVisualization::Moisture => (&self.moisture, &self.moisture_classes),
        }
    }

    /// RGBA texels for a visualization mode, x-major.
    pub fn colors(&self, config: &TileConfig, kind: TerrainVisualization) -> Result<Vec<[u8; 4]>> {
        let (field, classes) = self.visualized(kind);
        classes.colors(field, config.bands_for(kind))
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Runs the tile pipeline against a validated configuration.
#[derive(Debug, Clone)]
pub struct TileGenerator {
    config: TileConfig,
}

impl TileGenerator {
    /// Validate `config` once so every later call can only fail on its
    /// per-tile inputs.
    pub fn new(config: TileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    /// Generate the tile at `grid`, with the grid origin placed at `origin` in
    /// noise space.
    pub fn generate(&self, grid: GridContext, origin: WorldOffset) -> Result<TileResult> {
        grid.validate()?;
        let config = &self.config;
        let offset = grid.world_offset(config.sample_size, origin);
        debug!(
            "tile ({}, {}) of {} columns at noise offset ({}, {})",
            grid.tile_x, grid.tile_z, grid.columns, offset.x, offset.y
        );

        // ── 1. Height ───────────────────────────────────────────────────────
        let height = generate_height_field(config, offset)?;
        let detail_height = generate_detail_height_field(config, offset)?;

        // ── 2. Displacement ─────────────────────────────────────────────────
        let displacement = displacement(&height, &config.height_curve, config.max_height);

        // ── 3–4. Climate ────────────────────────────────────────────────────
        let heat = generate_heat_field(config, &height, offset, grid)?;
        let moisture = generate_moisture_field(config, &height, offset)?;

        // ── 5. Classification ───────────────────────────────────────────────
        let height_classes = classify(&detail_height, &config.height_bands)?;
        let heat_classes = classify(&heat, &config.heat_bands)?;
        let moisture_classes = classify(&moisture, &config.moisture_bands)?;

        Ok(TileResult {
            grid,
            offset,
            height,
            detail_height,
            displacement,
            heat,
            moisture,
            height_classes,
            heat_classes,
            moisture_classes,
        })
    }

    /// Generate every tile of a `columns × rows` grid, x varying fastest.
    /// The equator runs through the middle row band, so latitude follows
    /// `rows` whether or not the grid is square.
    ///
    /// Tiles are independent; with the `threading` feature they are generated
    /// in parallel. The first failing tile aborts the batch.
    pub fn generate_grid(&self, columns: u32, rows: u32, origin: WorldOffset) -> Result<Vec<TileResult>> {
        if columns == 0 || rows == 0 {
            return Err(TileError::EmptyGrid);
        }
        let tiles: Vec<GridContext> = GridContext::tiles(columns, rows).collect();
        debug!("generating {} tiles ({columns}×{rows})", tiles.len());

        #[cfg(feature = "threading")]
        let results: Result<Vec<TileResult>> = {
            use rayon::prelude::*;
            tiles.par_iter().map(|&g| self.generate(g, origin)).collect()
        };
        #[cfg(not(feature = "threading"))]
        let results: Result<Vec<TileResult>> = tiles.iter().map(|&g| self.generate(g, origin)).collect();
        results
    }
}
