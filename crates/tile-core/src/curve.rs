//! Keyframed response curves for reshaping height values.
//!
//! Keys are `(time, value)` pairs with optional tangents. Between keys the
//! curve is either linear or cubic Hermite; outside the key range it follows
//! the curve's [`OutOfRange`] policy. Monotonicity is not required.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
    /// Slope arriving at this key (Hermite only).
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key (Hermite only).
    #[serde(default)]
    pub out_tangent: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value, in_tangent: 0.0, out_tangent: 0.0 }
    }

    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self { time, value, in_tangent, out_tangent }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    Hermite,
}

/// Behaviour for inputs before the first key or after the last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRange {
    /// Hold the end key's value.
    #[default]
    Clamp,
    /// Continue along the end slope.
    Extrapolate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    pub keys: Vec<CurveKey>,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub out_of_range: OutOfRange,
}

impl ResponseCurve {
    /// Build and validate a curve.
    pub fn new(keys: Vec<CurveKey>, interpolation: Interpolation, out_of_range: OutOfRange) -> Result<Self> {
        let curve = Self { keys, interpolation, out_of_range };
        curve.validate()?;
        Ok(curve)
    }

    /// `f(x) = x` on [0, 1].
    pub fn identity() -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)],
            interpolation: Interpolation::Linear,
            out_of_range: OutOfRange::Clamp,
        }
    }

    /// Flat lowlands rising steeply toward the peaks.
    pub fn ease_in() -> Self {
        Self {
            keys: vec![
                CurveKey::with_tangents(0.0, 0.0, 0.0, 0.0),
                CurveKey::with_tangents(1.0, 1.0, 2.0, 2.0),
            ],
            interpolation: Interpolation::Hermite,
            out_of_range: OutOfRange::Clamp,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(TileError::EmptyCurve);
        }
        let mut previous = f32::NEG_INFINITY;
        for (index, key) in self.keys.iter().enumerate() {
            let finite = key.time.is_finite()
                && key.value.is_finite()
                && key.in_tangent.is_finite()
                && key.out_tangent.is_finite();
            if !finite || key.time <= previous {
                return Err(TileError::UnsortedCurve { index, time: key.time, previous });
            }
            previous = key.time;
        }
        Ok(())
    }

    /// Evaluate the curve at `x`. An empty curve evaluates to 0.
    ///
    /// NaN propagates: a NaN input yields NaN, like any other f32 arithmetic,
    /// rather than being snapped to an end key.
    pub fn evaluate(&self, x: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return 0.0,
        };
        if x.is_nan() {
            return f32::NAN;
        }

        if x <= first.time {
            return match self.out_of_range {
                OutOfRange::Clamp => first.value,
                OutOfRange::Extrapolate => first.value + self.start_slope() * (x - first.time),
            };
        }
        if x >= last.time {
            return match self.out_of_range {
                OutOfRange::Clamp => last.value,
                OutOfRange::Extrapolate => last.value + self.end_slope() * (x - last.time),
            };
        }

        // First key strictly after x. The clamp only matters for key lists
        // that were edited in place without `validate`.
        let next = self.keys.partition_point(|k| k.time <= x).clamp(1, self.keys.len() - 1);
        let a = self.keys[next - 1];
        let b = self.keys[next];
        match self.interpolation {
            Interpolation::Linear => lerp_keys(a, b, x),
            Interpolation::Hermite => hermite(a, b, x),
        }
    }

    fn start_slope(&self) -> f32 {
        match (self.interpolation, self.keys.as_slice()) {
            (Interpolation::Hermite, [first, ..]) => first.in_tangent,
            (Interpolation::Linear, [a, b, ..]) => (b.value - a.value) / (b.time - a.time),
            _ => 0.0,
        }
    }

    fn end_slope(&self) -> f32 {
        match (self.interpolation, self.keys.as_slice()) {
            (Interpolation::Hermite, [.., last]) => last.out_tangent,
            (Interpolation::Linear, [.., a, b]) => (b.value - a.value) / (b.time - a.time),
            _ => 0.0,
        }
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::identity()
    }
}

fn lerp_keys(a: CurveKey, b: CurveKey, x: f32) -> f32 {
    let s = (x - a.time) / (b.time - a.time);
    a.value + (b.value - a.value) * s
}

/// Cubic Hermite segment between two keys using their facing tangents.
fn hermite(a: CurveKey, b: CurveKey, x: f32) -> f32 {
    let dt = b.time - a.time;
    let s = (x - a.time) / dt;
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    h00 * a.value + h10 * dt * a.out_tangent + h01 * b.value + h11 * dt * b.in_tangent
}

/// Evaluate `curve` at `value`. Inputs far outside [0, 1] are logged, since
/// normalised noise only leaves that range in degenerate configurations.
pub fn evaluate_curve(curve: &ResponseCurve, value: f32) -> f32 {
    if value.is_nan() {
        warn!("response curve evaluated at NaN");
    } else if !(-0.5..=1.5).contains(&value) {
        warn!("response curve evaluated at {value}, far outside [0, 1]");
    }
    curve.evaluate(value)
}
