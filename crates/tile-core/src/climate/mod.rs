//! Heat and moisture derivation.
//!
//! Both fields are cheap element-wise blends of noise with the height field:
//!   heat     = clamp(random_heat · latitude + 0.5 · height, 0, 0.99)
//!   moisture = random_moisture − 0.01 · height   (left unclamped)
//!
//! Heat grows with distance from the equator and with altitude, so higher heat
//! values read as colder climate bands.

pub mod latitude;

use crate::error::Result;
use crate::field::ScalarField;

pub use latitude::{generate_uniform_field, LatitudeFalloff};

/// Weight of altitude in the heat blend.
pub const HEAT_HEIGHT_WEIGHT: f32 = 0.5;
/// Upper clamp of the heat field. Stays below 1 so the top heat band is never
/// reached only through clamping.
pub const HEAT_MAX: f32 = 0.99;
/// Drying applied per unit of height.
pub const MOISTURE_HEIGHT_WEIGHT: f32 = 0.01;

/// Blend random heat, the latitude gradient and height into a heat field.
///
/// All three fields must share dimensions.
pub fn combine_heat(
    height: &ScalarField,
    uniform_latitude: &ScalarField,
    random_heat: &ScalarField,
) -> Result<ScalarField> {
    height.ensure_same_dims(uniform_latitude)?;
    height.ensure_same_dims(random_heat)?;

    let banded = random_heat.zip_with(uniform_latitude, |r, u| r * u)?;
    banded.zip_with(height, |b, h| (b + HEAT_HEIGHT_WEIGHT * h).clamp(0.0, HEAT_MAX))
}

/// Dry `random_moisture` slightly with altitude. The result is not clamped.
pub fn combine_moisture(height: &ScalarField, random_moisture: &ScalarField) -> Result<ScalarField> {
    random_moisture.zip_with(height, |m, h| m - MOISTURE_HEIGHT_WEIGHT * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TileError;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_field(rng: &mut StdRng, n: usize, lo: f32, hi: f32) -> ScalarField {
        ScalarField::from_fn(n, n, |_, _| rng.gen_range(lo..hi))
    }

    #[test]
    fn heat_matches_blend_formula() {
        let h = ScalarField::constant(2, 2, 0.4);
        let u = ScalarField::constant(2, 2, 0.5);
        let r = ScalarField::constant(2, 2, 0.6);
        let heat = combine_heat(&h, &u, &r).unwrap();
        assert_abs_diff_eq!(heat.get(1, 1), 0.6 * 0.5 + 0.5 * 0.4, epsilon = 1e-6);
    }

    #[test]
    fn heat_always_within_clamp_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let h = random_field(&mut rng, 8, -1.0, 3.0);
            let u = random_field(&mut rng, 8, 0.0, 1.0);
            let r = random_field(&mut rng, 8, -2.0, 2.0);
            let heat = combine_heat(&h, &u, &r).unwrap();
            assert!(heat.min_value() >= 0.0, "heat below 0: {}", heat.min_value());
            assert!(heat.max_value() <= HEAT_MAX, "heat above 0.99: {}", heat.max_value());
        }
    }

    #[test]
    fn saturated_heat_clamps_to_0_99() {
        let one = ScalarField::constant(3, 3, 1.0);
        let heat = combine_heat(&one, &one, &one).unwrap();
        assert!(heat.values().iter().all(|&v| v == HEAT_MAX));
    }

    #[test]
    fn moisture_is_not_clamped() {
        let h = ScalarField::constant(2, 2, 1.0);
        let wet = ScalarField::constant(2, 2, 1.5);
        let dry = ScalarField::constant(2, 2, 0.0);
        let m_wet = combine_moisture(&h, &wet).unwrap();
        let m_dry = combine_moisture(&h, &dry).unwrap();
        assert_abs_diff_eq!(m_wet.get(0, 0), 1.49, epsilon = 1e-6);
        assert_abs_diff_eq!(m_dry.get(0, 0), -0.01, epsilon = 1e-6);
    }

    #[test]
    fn mismatched_dimensions_fail_fast() {
        let a = ScalarField::constant(4, 4, 0.5);
        let b = ScalarField::constant(5, 5, 0.5);
        assert!(matches!(combine_heat(&a, &a, &b), Err(TileError::DimensionMismatch { .. })));
        assert!(matches!(combine_heat(&a, &b, &a), Err(TileError::DimensionMismatch { .. })));
        assert!(matches!(combine_moisture(&a, &b), Err(TileError::DimensionMismatch { .. })));
    }
}
