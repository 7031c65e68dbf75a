use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

/// Position of a tile's sample origin in the unbounded noise domain.
///
/// `y` addresses the field's z axis. Coordinate math uses f64 so that far-away
/// tiles keep sub-sample precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldOffset {
    pub x: f64,
    pub y: f64,
}

impl WorldOffset {
    pub const ZERO: WorldOffset = WorldOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for WorldOffset {
    type Output = WorldOffset;

    fn add(self, rhs: WorldOffset) -> WorldOffset {
        WorldOffset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// One weighted noise layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wave {
    /// Perlin permutation seed.
    pub seed: u32,
    /// Scale divisor: larger values stretch the layer into broader features.
    pub frequency: f32,
    /// Weight of this layer in the normalised sum.
    pub amplitude: f32,
    /// Per-layer shift in noise space, decorrelating layers that share a seed.
    pub offset: WorldOffset,
}

impl Default for Wave {
    fn default() -> Self {
        Self { seed: 0, frequency: 1.0, amplitude: 1.0, offset: WorldOffset::ZERO }
    }
}

impl Wave {
    pub fn new(seed: u32, frequency: f32, amplitude: f32) -> Self {
        Self { seed, frequency, amplitude, offset: WorldOffset::ZERO }
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = WorldOffset::new(x, y);
        self
    }
}

/// Check every wave and return the amplitude total used for normalisation.
///
/// An empty slice is valid and yields 0.
pub fn validate_waves(waves: &[Wave]) -> Result<f32> {
    for (index, w) in waves.iter().enumerate() {
        if !w.frequency.is_finite() || w.frequency <= 0.0 {
            return Err(TileError::InvalidWave { index, reason: "frequency must be finite and > 0" });
        }
        if !w.amplitude.is_finite() || w.amplitude < 0.0 {
            return Err(TileError::InvalidWave { index, reason: "amplitude must be finite and >= 0" });
        }
        if !w.offset.x.is_finite() || !w.offset.y.is_finite() {
            return Err(TileError::InvalidWave { index, reason: "offset must be finite" });
        }
    }
    let total: f32 = waves.iter().map(|w| w.amplitude).sum();
    if !waves.is_empty() && !(total > 0.0 && total.is_finite()) {
        return Err(TileError::ZeroAmplitude(total));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_total_sums_layers() {
        let waves = [Wave::new(1, 1.0, 0.75), Wave::new(2, 0.5, 0.25)];
        assert_eq!(validate_waves(&waves).unwrap(), 1.0);
    }

    #[test]
    fn empty_waves_are_valid() {
        assert_eq!(validate_waves(&[]).unwrap(), 0.0);
    }

    #[test]
    fn non_positive_frequency_is_rejected() {
        let err = validate_waves(&[Wave::new(0, 0.0, 1.0)]).unwrap_err();
        assert!(matches!(err, TileError::InvalidWave { index: 0, .. }));
    }

    #[test]
    fn all_zero_amplitudes_are_rejected() {
        let waves = [Wave::new(0, 1.0, 0.0), Wave::new(1, 1.0, 0.0)];
        assert!(matches!(validate_waves(&waves), Err(TileError::ZeroAmplitude(_))));
    }

    #[test]
    fn wave_deserialises_with_defaults() {
        let w: Wave = serde_json::from_str(r#"{"seed": 7, "amplitude": 0.5}"#).unwrap();
        assert_eq!(w.seed, 7);
        assert_eq!(w.frequency, 1.0);
        assert_eq!(w.amplitude, 0.5);
        assert_eq!(w.offset, WorldOffset::ZERO);
    }
}
