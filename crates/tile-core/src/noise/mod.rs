//! Layered noise synthesis.
//!
//! A tile field is the amplitude-weighted mean of several Perlin layers
//! ("waves"), each remapped to [0, 1]. Every tile spans exactly `sample_size`
//! world units with its edge samples included, so two tiles whose offsets
//! differ by `sample_size` evaluate their shared border at identical
//! coordinates and agree bit for bit.

pub mod wave;

use log::{debug, trace};
use noise::{NoiseFn, Perlin};

use crate::error::{Result, TileError};
use crate::field::ScalarField;
pub use wave::{validate_waves, Wave, WorldOffset};

/// Upper bound on the cells of one generated field (1 GiB of `f32`).
pub const MAX_FIELD_CELLS: usize = 1 << 28;

/// Samples per edge of a field at `resolution`, checked against
/// [`MAX_FIELD_CELLS`].
pub fn field_samples(sample_size: usize, resolution: usize) -> Result<usize> {
    sample_size
        .checked_mul(resolution)
        .filter(|&m| m.checked_mul(m).is_some_and(|cells| cells <= MAX_FIELD_CELLS))
        .ok_or(TileError::FieldTooLarge { sample_size, resolution })
}

/// Reject sampling parameters that would divide by zero, produce no cells or
/// exceed the field size limit.
pub fn validate_sampling(sample_size: usize, scale: f32, resolution: usize) -> Result<()> {
    if sample_size < 2 {
        return Err(TileError::InvalidSampleSize(sample_size));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TileError::InvalidScale(scale));
    }
    if resolution == 0 {
        return Err(TileError::InvalidResolution(resolution));
    }
    field_samples(sample_size, resolution)?;
    Ok(())
}

/// World-space position of sample `index` along one axis of a tile.
///
/// `samples` points cover the closed span `[0, sample_size]`. The product is
/// formed before the division so the last sample lands exactly on
/// `sample_size`.
#[inline]
pub fn sample_coordinate(index: usize, sample_size: usize, samples: usize) -> f64 {
    (index * sample_size) as f64 / (samples - 1) as f64
}

/// A wave with its permutation table built once per field.
struct Layer {
    perlin: Perlin,
    frequency: f64,
    amplitude: f64,
    offset: WorldOffset,
}

impl Layer {
    fn new(w: &Wave) -> Self {
        Self {
            perlin: Perlin::new(w.seed),
            frequency: w.frequency as f64,
            amplitude: w.amplitude as f64,
            offset: w.offset,
        }
    }

    /// Perlin output remapped from (−1, 1) to [0, 1].
    #[inline]
    fn unit_sample(&self, wx: f64, wz: f64, scale: f64) -> f64 {
        let nx = (wx + self.offset.x) / scale / self.frequency;
        let nz = (wz + self.offset.y) / scale / self.frequency;
        (self.perlin.get([nx, nz]) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

/// Generate a `M × M` field, `M = sample_size × resolution`, from `waves`.
///
/// Each cell is `Σ amplitude·noise / Σ amplitude`, so the result stays in
/// [0, 1]. An empty wave list yields a field of zeros.
pub fn generate_noise_field(
    sample_size: usize,
    scale: f32,
    waves: &[Wave],
    offset: WorldOffset,
    resolution: usize,
) -> Result<ScalarField> {
    validate_sampling(sample_size, scale, resolution)?;
    let total_amplitude = validate_waves(waves)? as f64;

    let samples = field_samples(sample_size, resolution)?;
    if waves.is_empty() {
        debug!("noise field {samples}×{samples}: no waves, emitting zeros");
        return Ok(ScalarField::constant(samples, samples, 0.0));
    }

    let layers: Vec<Layer> = waves.iter().map(Layer::new).collect();
    for (i, w) in waves.iter().enumerate() {
        trace!("wave {i}: seed={} frequency={} amplitude={}", w.seed, w.frequency, w.amplitude);
    }
    let scale = scale as f64;

    let fill_column = |x: usize, column: &mut [f32]| {
        let wx = sample_coordinate(x, sample_size, samples) + offset.x;
        for (z, cell) in column.iter_mut().enumerate() {
            let wz = sample_coordinate(z, sample_size, samples) + offset.y;
            let sum: f64 = layers.iter().map(|l| l.amplitude * l.unit_sample(wx, wz, scale)).sum();
            *cell = (sum / total_amplitude) as f32;
        }
    };

    let mut data = vec![0.0f32; samples * samples];
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(samples)
            .enumerate()
            .for_each(|(x, column)| fill_column(x, column));
    }
    #[cfg(not(feature = "threading"))]
    {
        data.chunks_mut(samples)
            .enumerate()
            .for_each(|(x, column)| fill_column(x, column));
    }

    let field = ScalarField::from_vec(samples, samples, data)?;
    debug!(
        "noise field {samples}×{samples} at ({}, {}): {} waves, range [{:.3}, {:.3}]",
        offset.x,
        offset.y,
        waves.len(),
        field.min_value(),
        field.max_value()
    );
    Ok(field)
}
