use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

/// A 2D scalar field indexed `[x, z]`, stored x-major (`x * size_z + z`).
///
/// The x-major layout matches the vertex order of a tile mesh, so a field can
/// be written straight into a vertex buffer. Fields are never mutated after
/// construction; every pipeline stage builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScalarField")]
pub struct ScalarField {
    data: Vec<f32>,
    size_x: usize,
    size_z: usize,
}

/// Unchecked wire form; deserialisation goes through [`ScalarField::from_vec`].
#[derive(Deserialize)]
struct RawScalarField {
    data: Vec<f32>,
    size_x: usize,
    size_z: usize,
}

impl TryFrom<RawScalarField> for ScalarField {
    type Error = TileError;

    fn try_from(raw: RawScalarField) -> Result<Self> {
        Self::from_vec(raw.size_x, raw.size_z, raw.data)
    }
}

impl ScalarField {
    /// Build a field by evaluating `f(x, z)` for every cell.
    pub fn from_fn(size_x: usize, size_z: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(size_x * size_z);
        for x in 0..size_x {
            for z in 0..size_z {
                data.push(f(x, z));
            }
        }
        Self { data, size_x, size_z }
    }

    /// Wrap an x-major buffer. The buffer length must equal `size_x * size_z`.
    pub fn from_vec(size_x: usize, size_z: usize, data: Vec<f32>) -> Result<Self> {
        if size_x.checked_mul(size_z) != Some(data.len()) {
            return Err(TileError::DimensionMismatch {
                expected: (size_x, size_z),
                found: (data.len(), 1),
            });
        }
        Ok(Self { data, size_x, size_z })
    }

    /// A field holding `value` everywhere.
    pub fn constant(size_x: usize, size_z: usize, value: f32) -> Self {
        Self { data: vec![value; size_x * size_z], size_x, size_z }
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.data[x * self.size_z + z]
    }

    #[inline]
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    #[inline]
    pub fn size_z(&self) -> usize {
        self.size_z
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.size_x, self.size_z)
    }

    /// Raw x-major values.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Values of column `x` (all z for one x).
    pub fn column(&self, x: usize) -> &[f32] {
        &self.data[x * self.size_z..(x + 1) * self.size_z]
    }

    /// Values of row `z` (all x for one z).
    pub fn row(&self, z: usize) -> Vec<f32> {
        (0..self.size_x).map(|x| self.get(x, z)).collect()
    }

    /// A new field with `f` applied to every value.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            size_x: self.size_x,
            size_z: self.size_z,
        }
    }

    /// Combine two fields cell by cell. Fails when the dimensions differ.
    pub fn zip_with(&self, other: &ScalarField, f: impl Fn(f32, f32) -> f32) -> Result<Self> {
        self.ensure_same_dims(other)?;
        Ok(Self {
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| f(a, b)).collect(),
            size_x: self.size_x,
            size_z: self.size_z,
        })
    }

    pub fn ensure_same_dims(&self, other: &ScalarField) -> Result<()> {
        if self.dims() != other.dims() {
            return Err(TileError::DimensionMismatch {
                expected: self.dims(),
                found: other.dims(),
            });
        }
        Ok(())
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_uses_x_major_layout() {
        let f = ScalarField::from_fn(3, 2, |x, z| (x * 10 + z) as f32);
        assert_eq!(f.values(), &[0.0, 1.0, 10.0, 11.0, 20.0, 21.0]);
        assert_eq!(f.get(2, 1), 21.0);
        assert_eq!(f.column(1), &[10.0, 11.0]);
        assert_eq!(f.row(1), vec![1.0, 11.0, 21.0]);
    }

    #[test]
    fn zip_with_rejects_mismatched_dims() {
        let a = ScalarField::constant(4, 4, 1.0);
        let b = ScalarField::constant(4, 5, 1.0);
        assert!(matches!(a.zip_with(&b, |x, y| x + y), Err(TileError::DimensionMismatch { .. })));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(ScalarField::from_vec(2, 2, vec![0.0; 3]).is_err());
        assert!(ScalarField::from_vec(2, 2, vec![0.0; 4]).is_ok());
    }

    #[test]
    fn deserialising_checks_length() {
        let err = serde_json::from_str::<ScalarField>(r#"{"data":[1.0],"size_x":4,"size_z":4}"#);
        assert!(err.is_err());

        let f = ScalarField::from_fn(2, 3, |x, z| (x + z) as f32);
        let back: ScalarField = serde_json::from_str(&serde_json::to_string(&f).unwrap()).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn min_max_track_extremes() {
        let f = ScalarField::from_fn(4, 4, |x, z| x as f32 - z as f32);
        assert_eq!(f.min_value(), -3.0);
        assert_eq!(f.max_value(), 3.0);
    }
}
