//! Procedural terrain tile generation.
//!
//! A tile is built from layered Perlin noise: a height field shaped by a
//! response curve into vertex displacement, plus heat and moisture fields
//! derived from height and grid latitude. Each field is classified into
//! discrete bands for rendering or gameplay. Everything is a pure function of
//! configuration and tile position, so tiles can be generated on any thread
//! and neighbouring tiles line up exactly at their borders.

pub mod classify;
pub mod climate;
pub mod config;
pub mod curve;
pub mod displacement;
pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod noise;

pub use classify::{classify, Band, DiscreteField, Gradient};
pub use config::{TerrainVisualization, TileConfig};
pub use curve::{evaluate_curve, ResponseCurve};
pub use error::{Result, TileError};
pub use field::ScalarField;
pub use generator::{
    generate_heat_field, generate_height_field, generate_moisture_field, TileGenerator, TileResult,
};
pub use grid::GridContext;
pub use crate::noise::{Wave, WorldOffset};
