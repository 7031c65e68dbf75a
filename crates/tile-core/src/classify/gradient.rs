use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

/// A colour stop in a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the gradient, [0, 1].
    pub position: f32,
    /// RGBA, each component in [0, 1].
    pub color: [f32; 4],
}

impl ColorStop {
    pub fn new(position: f32, color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Piecewise-linear colour ramp attached to a classification band.
/// Serialised as its list of stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    /// Stops are sorted by position; the order they are given in does not matter.
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// A single flat colour.
    pub fn solid(color: [f32; 4]) -> Self {
        Self::new(vec![ColorStop::new(0.0, color)])
    }

    /// Blend from `from` at 0 to `to` at 1.
    pub fn linear(from: [f32; 4], to: [f32; 4]) -> Self {
        Self::new(vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)])
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn validate(&self) -> Result<()> {
        if self.stops.is_empty() {
            return Err(TileError::EmptyGradient);
        }
        Ok(())
    }

    /// Colour at `t`, holding the end colours outside the stop range.
    pub fn evaluate(&self, t: f32) -> [f32; 4] {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return [0.0, 0.0, 0.0, 1.0],
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.color;
                }
                let s = (t - a.position) / span;
                let mut out = [0.0f32; 4];
                for (o, (ca, cb)) in out.iter_mut().zip(a.color.iter().zip(&b.color)) {
                    *o = ca + (cb - ca) * s;
                }
                return out;
            }
        }
        last.color
    }

    /// Colour at `t` quantised to 8-bit RGBA.
    pub fn evaluate_rgba8(&self, t: f32) -> [u8; 4] {
        self.evaluate(t).map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl From<Vec<ColorStop>> for Gradient {
    fn from(stops: Vec<ColorStop>) -> Self {
        Self::new(stops)
    }
}

impl From<Gradient> for Vec<ColorStop> {
    fn from(g: Gradient) -> Self {
        g.stops
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::linear([0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0])
    }
}
