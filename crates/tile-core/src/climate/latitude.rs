//! Latitude gradient for heat banding.
//!
//! The uniform field depends only on the distance of a row from the grid's
//! equator line: 0 on the equator, rising to 1 at `max_distance` and beyond.
//! No noise is involved.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::field::ScalarField;
use crate::noise::{field_samples, sample_coordinate};

/// Shape of the rise from equator (0) to pole (1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatitudeFalloff {
    /// Proportional to distance.
    #[default]
    Linear,
    /// Flat near the equator, steepening toward the poles.
    Cosine,
}

impl LatitudeFalloff {
    /// Map a normalised distance `t ∈ [0, 1]` to the latitude weight.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            LatitudeFalloff::Linear => t,
            LatitudeFalloff::Cosine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
        }
    }
}

/// Generate the `sample_size × sample_size` latitude field.
///
/// `z_position` is the signed distance, in samples, from the equator to the
/// tile's first row; rows advance with the same spacing as the noise fields so
/// neighbouring tiles agree on their shared row.
pub fn generate_uniform_field(
    sample_size: usize,
    z_position: f64,
    max_distance: f64,
    falloff: LatitudeFalloff,
) -> Result<ScalarField> {
    if sample_size < 2 {
        return Err(TileError::InvalidSampleSize(sample_size));
    }
    field_samples(sample_size, 1)?;
    if !z_position.is_finite() {
        return Err(TileError::InvalidLatitude("z position must be finite"));
    }
    if !max_distance.is_finite() || max_distance <= 0.0 {
        return Err(TileError::InvalidLatitude("max distance must be finite and > 0"));
    }

    let by_row: Vec<f32> = (0..sample_size)
        .map(|z| {
            let dz = z_position + sample_coordinate(z, sample_size, sample_size);
            falloff.apply(dz.abs() / max_distance) as f32
        })
        .collect();

    Ok(ScalarField::from_fn(sample_size, sample_size, |_, z| by_row[z]))
}
