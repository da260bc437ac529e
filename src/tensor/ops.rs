//! # Tensor Operations
//!
//! Shape-checked linear algebra for the forward and backward passes.
//! No broadcasting: every operand must have exactly the expected shape.

use ndarray::{ArrayView1, Axis};

use super::{shape_of, Matrix, TensorData, Vector};
use crate::error::{NetworkError, Result};

/// Row-vector times matrix: `input · weights`.
///
/// Requires `len(input) == rows(weights)`; the result has `cols(weights)` entries.
pub fn vec_mat(input: ArrayView1<'_, TensorData>, weights: &Matrix) -> Result<Vector> {
    if input.len() != weights.nrows() {
        return Err(NetworkError::DimensionMismatch {
            context: "vector-matrix product".to_string(),
            expected: vec![weights.nrows()],
            got: vec![input.len()],
        });
    }
    Ok(input.dot(weights))
}

/// Row-vector times the transpose of a matrix: `delta · weightsᵀ`.
///
/// Used to carry an error signal from a layer back to the layer feeding it.
/// Requires `len(delta) == cols(weights)`; the result has `rows(weights)` entries.
pub fn vec_mat_t(delta: ArrayView1<'_, TensorData>, weights: &Matrix) -> Result<Vector> {
    if delta.len() != weights.ncols() {
        return Err(NetworkError::DimensionMismatch {
            context: "transposed vector-matrix product".to_string(),
            expected: vec![weights.ncols()],
            got: vec![delta.len()],
        });
    }
    // (W · δᵀ)ᵀ == δ · Wᵀ
    Ok(weights.dot(&delta))
}

/// In-place `weights += alpha · outer(rows, cols)`.
pub fn outer_scaled_add(
    weights: &mut Matrix,
    alpha: TensorData,
    rows: ArrayView1<'_, TensorData>,
    cols: ArrayView1<'_, TensorData>,
) -> Result<()> {
    if rows.len() != weights.nrows() || cols.len() != weights.ncols() {
        return Err(NetworkError::dimension(
            "outer product update",
            &shape_of(weights),
            &[rows.len(), cols.len()],
        ));
    }
    let outer = rows
        .insert_axis(Axis(1))
        .dot(&cols.insert_axis(Axis(0)));
    weights.scaled_add(alpha, &outer);
    Ok(())
}
