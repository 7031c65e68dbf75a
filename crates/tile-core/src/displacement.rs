//! Vertical displacement of a tile mesh from its height field.

use crate::curve::ResponseCurve;
use crate::error::{Result, TileError};
use crate::field::ScalarField;

/// `curve(height) · max_height` for every cell, as a new field.
pub fn displacement(height: &ScalarField, curve: &ResponseCurve, max_height: f32) -> ScalarField {
    height.map(|h| curve.evaluate(h) * max_height)
}

/// Write displaced heights into the y component of a mesh vertex buffer.
///
/// The buffer must hold one vertex per height cell, ordered `x * size_z + z`.
/// Only y is touched; x and z belong to the mesh builder.
pub fn displace_vertices(
    vertices: &mut [[f32; 3]],
    height: &ScalarField,
    curve: &ResponseCurve,
    max_height: f32,
) -> Result<()> {
    let expected = height.values().len();
    if vertices.len() != expected {
        return Err(TileError::VertexCountMismatch { expected, found: vertices.len() });
    }
    curve.validate()?;
    for (vertex, &h) in vertices.iter_mut().zip(height.values()) {
        vertex[1] = curve.evaluate(h) * max_height;
    }
    Ok(())
}
