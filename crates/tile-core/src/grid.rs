//! Tile addressing within a square grid of tiles.
//! Tile `(0, 0)` sits at the grid origin; tiles advance by `sample_size` world
//! units per index so neighbouring noise fields share their borders.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::noise::WorldOffset;

/// Where a tile sits in the grid, plus the grid extent used for latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridContext {
    pub tile_x: i32,
    pub tile_z: i32,
    /// Tiles per grid row.
    pub columns: u32,
    /// Tiles along z. Fixes the equator line and the pole distance.
    pub rows: u32,
}

impl GridContext {
    /// A tile in a square `columns × columns` grid.
    pub fn new(tile_x: i32, tile_z: i32, columns: u32) -> Self {
        Self { tile_x, tile_z, columns, rows: columns }
    }

    /// Override the row count for grids that are not square.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// A lone tile at the origin of a one-tile grid.
    pub fn single() -> Self {
        Self::new(0, 0, 1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(TileError::EmptyGrid);
        }
        Ok(())
    }

    /// Noise-space origin of this tile: `origin + index * sample_size`.
    pub fn world_offset(&self, sample_size: usize, origin: WorldOffset) -> WorldOffset {
        let n = sample_size as f64;
        origin + WorldOffset::new(self.tile_x as f64 * n, self.tile_z as f64 * n)
    }

    /// Signed distance, in samples, from the equator to this tile's first row.
    /// The equator runs through the middle of the grid.
    pub fn equator_distance(&self, sample_size: usize) -> f64 {
        let n = sample_size as f64;
        self.tile_z as f64 * n - self.rows as f64 * n / 2.0
    }

    /// Distance from the equator at which the latitude weight reaches 1: half
    /// the grid's z extent plus one sample.
    pub fn pole_distance(&self, sample_size: usize) -> f64 {
        sample_size as f64 / 2.0 * self.rows as f64 + 1.0
    }

    /// Every tile of a `columns × rows` grid, x varying fastest.
    pub fn tiles(columns: u32, rows: u32) -> impl Iterator<Item = GridContext> {
        (0..rows as i32).flat_map(move |z| {
            (0..columns as i32).map(move |x| GridContext::new(x, z, columns).with_rows(rows))
        })
    }
}
