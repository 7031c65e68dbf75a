//! Threshold classification of scalar fields into discrete bands.
//!
//! Bands are ordered by ascending threshold. A value belongs to the first band
//! whose threshold is ≥ the value; values above every threshold fall into the
//! last band. The result partitions the value axis into contiguous steps.

pub mod gradient;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};
use crate::field::ScalarField;
pub use gradient::{ColorStop, Gradient};

/// One classification band (a "terrain type").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Inclusive upper bound of the band, in [0, 1].
    pub threshold: f32,
    pub label: String,
    /// Colour ramp sampled by renderers across the band's value range.
    #[serde(default)]
    pub gradient: Gradient,
}

impl Band {
    pub fn new(threshold: f32, label: impl Into<String>) -> Self {
        Self { threshold, label: label.into(), gradient: Gradient::default() }
    }

    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = gradient;
        self
    }
}

/// Check that `bands` is non-empty, in range and sorted.
///
/// `field` names the band list in error messages.
pub fn validate_bands(field: &'static str, bands: &[Band]) -> Result<()> {
    if bands.is_empty() {
        return Err(TileError::EmptyBands { field });
    }
    let mut previous = f32::NEG_INFINITY;
    for (index, band) in bands.iter().enumerate() {
        let threshold = band.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(TileError::ThresholdOutOfRange { field, index, threshold });
        }
        if threshold < previous {
            return Err(TileError::UnsortedBands { field, index, threshold, previous });
        }
        band.gradient.validate()?;
        previous = threshold;
    }
    Ok(())
}

/// Band index for a single value. `bands` must already be validated.
#[inline]
pub fn classify_value(value: f32, bands: &[Band]) -> usize {
    let first_at_or_above = bands.partition_point(|b| b.threshold < value);
    first_at_or_above.min(bands.len().saturating_sub(1))
}

/// Per-cell band indices, x-major like [`ScalarField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscreteField")]
pub struct DiscreteField {
    indices: Vec<usize>,
    size_x: usize,
    size_z: usize,
    band_count: usize,
}

#[derive(Deserialize)]
struct RawDiscreteField {
    indices: Vec<usize>,
    size_x: usize,
    size_z: usize,
    band_count: usize,
}

impl TryFrom<RawDiscreteField> for DiscreteField {
    type Error = TileError;

    fn try_from(raw: RawDiscreteField) -> Result<Self> {
        if raw.size_x.checked_mul(raw.size_z) != Some(raw.indices.len()) {
            return Err(TileError::DimensionMismatch {
                expected: (raw.size_x, raw.size_z),
                found: (raw.indices.len(), 1),
            });
        }
        if let Some(&index) = raw.indices.iter().find(|&&i| i >= raw.band_count) {
            return Err(TileError::BandIndexOutOfRange { index, band_count: raw.band_count });
        }
        Ok(Self { indices: raw.indices, size_x: raw.size_x, size_z: raw.size_z, band_count: raw.band_count })
    }
}

impl DiscreteField {
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> usize {
        self.indices[x * self.size_z + z]
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.size_x, self.size_z)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Label of the band at `(x, z)`.
    pub fn label<'a>(&self, x: usize, z: usize, bands: &'a [Band]) -> &'a str {
        &bands[self.get(x, z)].label
    }

    /// Number of cells per band.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.band_count];
        for &i in &self.indices {
            counts[i] += 1;
        }
        counts
    }

    /// Fraction of cells per band, paired with the band label.
    pub fn coverage<'a>(&self, bands: &'a [Band]) -> Vec<(&'a str, f32)> {
        let total = self.indices.len().max(1) as f32;
        self.histogram()
            .into_iter()
            .zip(bands)
            .map(|(count, band)| (band.label.as_str(), count as f32 / total))
            .collect()
    }

    /// RGBA colour per cell, x-major.
    ///
    /// Each cell samples its band's gradient at the cell's relative position
    /// between the previous threshold (0 for the first band) and its own.
    pub fn colors(&self, field: &ScalarField, bands: &[Band]) -> Result<Vec<[u8; 4]>> {
        if field.dims() != self.dims() {
            return Err(TileError::DimensionMismatch { expected: self.dims(), found: field.dims() });
        }
        if bands.len() != self.band_count {
            return Err(TileError::BandCountMismatch { expected: self.band_count, found: bands.len() });
        }
        Ok(self
            .indices
            .iter()
            .zip(field.values())
            .map(|(&i, &v)| {
                let lower = if i == 0 { 0.0 } else { bands[i - 1].threshold };
                let upper = bands[i].threshold;
                let t = if upper > lower { (v - lower) / (upper - lower) } else { 1.0 };
                bands[i].gradient.evaluate_rgba8(t.clamp(0.0, 1.0))
            })
            .collect())
    }
}

/// Classify every cell of `field` against `bands`.
pub fn classify(field: &ScalarField, bands: &[Band]) -> Result<DiscreteField> {
    validate_bands("classification", bands)?;
    Ok(DiscreteField {
        indices: field.values().iter().map(|&v| classify_value(v, bands)).collect(),
        size_x: field.size_x(),
        size_z: field.size_z(),
        band_count: bands.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn land_bands() -> Vec<Band> {
        vec![Band::new(0.3, "water"), Band::new(0.6, "grass"), Band::new(1.0, "rock")]
    }

    fn label_of(v: f32, bands: &[Band]) -> &str {
        &bands[classify_value(v, bands)].label
    }

    #[test]
    fn thresholds_select_expected_labels() {
        let bands = land_bands();
        assert_eq!(label_of(0.0, &bands), "water");
        assert_eq!(label_of(0.3, &bands), "water");
        assert_eq!(label_of(0.31, &bands), "grass");
        assert_eq!(label_of(0.6, &bands), "grass");
        assert_eq!(label_of(1.0, &bands), "rock");
        assert_eq!(label_of(1.5, &bands), "rock");
        assert_eq!(label_of(-0.2, &bands), "water");
    }

    #[test]
    fn increasing_values_never_lower_the_band() {
        let bands = land_bands();
        let mut rng = StdRng::seed_from_u64(5);
        let mut values: Vec<f32> = (0..500).map(|_| rng.gen_range(-0.5..1.5)).collect();
        values.sort_by(f32::total_cmp);
        let indices: Vec<usize> = values.iter().map(|&v| classify_value(v, &bands)).collect();
        assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn equal_thresholds_pick_the_first() {
        let bands = vec![Band::new(0.5, "a"), Band::new(0.5, "b"), Band::new(1.0, "c")];
        assert_eq!(label_of(0.5, &bands), "a");
        assert_eq!(label_of(0.51, &bands), "c");
    }

    #[test]
    fn classify_keeps_field_layout() {
        let field = ScalarField::from_fn(2, 3, |x, z| (x * 3 + z) as f32 * 0.2);
        let classes = classify(&field, &land_bands()).unwrap();
        assert_eq!(classes.dims(), (2, 3));
        assert_eq!(classes.indices(), &[0, 0, 1, 1, 2, 2]);
        assert_eq!(classes.label(1, 2, &land_bands()), "rock");
        assert_eq!(classes.histogram(), vec![2, 2, 2]);
    }

    #[test]
    fn invalid_bands_are_rejected() {
        let field = ScalarField::constant(2, 2, 0.5);
        assert!(matches!(classify(&field, &[]), Err(TileError::EmptyBands { .. })));

        let unsorted = vec![Band::new(0.6, "a"), Band::new(0.3, "b")];
        assert!(matches!(
            classify(&field, &unsorted),
            Err(TileError::UnsortedBands { index: 1, .. })
        ));

        let out_of_range = vec![Band::new(1.2, "a")];
        assert!(matches!(
            classify(&field, &out_of_range),
            Err(TileError::ThresholdOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn deserialising_checks_indices() {
        let short = r#"{"indices":[0],"size_x":2,"size_z":2,"band_count":3}"#;
        assert!(serde_json::from_str::<DiscreteField>(short).is_err());

        let stray = r#"{"indices":[0,1,2,3],"size_x":2,"size_z":2,"band_count":3}"#;
        assert!(serde_json::from_str::<DiscreteField>(stray).is_err());

        let field = ScalarField::from_fn(2, 2, |x, z| (x + z) as f32 * 0.4);
        let classes = classify(&field, &land_bands()).unwrap();
        let back: DiscreteField = serde_json::from_str(&serde_json::to_string(&classes).unwrap()).unwrap();
        assert_eq!(back, classes);
        assert_eq!(back.histogram().iter().sum::<usize>(), 4);
    }

    #[test]
    fn colors_sample_band_gradients() {
        let bands = vec![
            Band::new(0.5, "low").with_gradient(Gradient::solid([0.0, 0.0, 1.0, 1.0])),
            Band::new(1.0, "high").with_gradient(Gradient::linear([0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0])),
        ];
        let field = ScalarField::from_vec(1, 3, vec![0.2, 0.75, 1.0]).unwrap();
        let classes = classify(&field, &bands).unwrap();
        let colors = classes.colors(&field, &bands).unwrap();
        assert_eq!(colors[0], [0, 0, 255, 255]);
        assert_eq!(colors[1], [128, 128, 128, 255]);
        assert_eq!(colors[2], [255, 255, 255, 255]);
    }
}
