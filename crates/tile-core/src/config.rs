use serde::{Deserialize, Serialize};

use crate::classify::{validate_bands, Band, ColorStop, Gradient};
use crate::climate::LatitudeFalloff;
use crate::curve::ResponseCurve;
use crate::error::{Result, TileError};
use crate::noise::{validate_sampling, validate_waves, Wave};

/// Which classified field a renderer should display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainVisualization {
    #[default]
    Height,
    Heat,
    Moisture,
}

/// Everything needed to generate one tile.
/// Defaults give a temperate island-style preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Samples per tile edge; also the tile stride in world units.
    pub sample_size: usize,
    /// Global noise scale divisor.
    pub scale: f32,
    /// Multiplier for the texture-density height field.
    pub texture_resolution: usize,
    /// Vertical extent of a fully raised vertex.
    pub max_height: f32,
    pub visualization: TerrainVisualization,

    pub waves: Vec<Wave>,
    pub heat_waves: Vec<Wave>,
    pub moisture_waves: Vec<Wave>,

    pub height_bands: Vec<Band>,
    /// Heat rises toward the poles and with altitude, so ascending heat bands
    /// run from warm to cold.
    pub heat_bands: Vec<Band>,
    pub moisture_bands: Vec<Band>,

    pub height_curve: ResponseCurve,
    pub latitude_falloff: LatitudeFalloff,
}

fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

fn ramp(from: [f32; 4], to: [f32; 4]) -> Gradient {
    Gradient::new(vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)])
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            sample_size: 16,
            scale: 20.0,
            texture_resolution: 4,
            max_height: 6.0,
            visualization: TerrainVisualization::Height,

            waves: vec![
                Wave::new(56, 1.0, 1.0),
                Wave::new(199, 0.5, 0.5).with_offset(31.7, 12.2),
            ],
            heat_waves: vec![Wave::new(839, 1.0, 1.0), Wave::new(869, 0.5, 0.5)],
            moisture_waves: vec![Wave::new(2228, 1.0, 1.0)],

            height_bands: vec![
                Band::new(0.40, "water").with_gradient(ramp(rgb(16, 48, 120), rgb(40, 96, 180))),
                Band::new(0.45, "sand").with_gradient(ramp(rgb(214, 196, 140), rgb(200, 180, 120))),
                Band::new(0.65, "grass").with_gradient(ramp(rgb(80, 150, 60), rgb(50, 110, 40))),
                Band::new(0.85, "mountain").with_gradient(ramp(rgb(110, 90, 70), rgb(140, 130, 120))),
                Band::new(1.00, "snow").with_gradient(ramp(rgb(230, 230, 235), rgb(255, 255, 255))),
            ],
            heat_bands: vec![
                Band::new(0.25, "hottest").with_gradient(Gradient::solid(rgb(200, 40, 20))),
                Band::new(0.45, "hot").with_gradient(Gradient::solid(rgb(240, 140, 40))),
                Band::new(0.70, "cold").with_gradient(Gradient::solid(rgb(120, 190, 230))),
                Band::new(1.00, "coldest").with_gradient(Gradient::solid(rgb(235, 245, 255))),
            ],
            moisture_bands: vec![
                Band::new(0.30, "dry").with_gradient(Gradient::solid(rgb(230, 200, 120))),
                Band::new(0.60, "wet").with_gradient(Gradient::solid(rgb(90, 170, 110))),
                Band::new(1.00, "wettest").with_gradient(Gradient::solid(rgb(30, 80, 160))),
            ],

            height_curve: ResponseCurve::ease_in(),
            latitude_falloff: LatitudeFalloff::Linear,
        }
    }
}

impl TileConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TileConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run every fail-fast check before any field is generated.
    pub fn validate(&self) -> Result<()> {
        validate_sampling(self.sample_size, self.scale, self.texture_resolution)?;
        if !self.max_height.is_finite() {
            return Err(TileError::InvalidMaxHeight(self.max_height));
        }
        validate_waves(&self.waves)?;
        validate_waves(&self.heat_waves)?;
        validate_waves(&self.moisture_waves)?;
        validate_bands("height", &self.height_bands)?;
        validate_bands("heat", &self.heat_bands)?;
        validate_bands("moisture", &self.moisture_bands)?;
        self.height_curve.validate()
    }

    /// Bands belonging to the chosen visualization.
    pub fn bands_for(&self, kind: TerrainVisualization) -> &[Band] {
        match kind {
            TerrainVisualization::Height => &self.height_bands,
            TerrainVisualization::Heat => &self.heat_bands,
            TerrainVisualization::Moisture => &self.moisture_bands,
        }
    }
}
