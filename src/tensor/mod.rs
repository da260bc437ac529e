//! # Tensor Module
//!
//! Dense numeric containers used by the network. Weight matrices are
//! `ndarray::Array2<f64>` with shape `(fan_in, fan_out)`; layer buffers are
//! `ndarray::Array1<f64>`. The persisted document stores matrices as nested
//! row vectors, so conversions to and from that form live here too.

use ndarray::{Array1, Array2};

use crate::error::{NetworkError, Result};

// --- Submodules ---
pub mod ops;

// Define a type alias for the underlying data type
pub type TensorData = f64;

/// A weight matrix between two layers: rows = fan-in, cols = fan-out.
pub type Matrix = Array2<TensorData>;

/// A layer-sized buffer (raw values, biases, activations).
pub type Vector = Array1<TensorData>;

/// Builds a matrix from row vectors, rejecting ragged input.
pub fn matrix_from_rows(rows: &[Vec<TensorData>]) -> Result<Matrix> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != n_cols {
            return Err(NetworkError::dimension(
                format!("weight matrix row {}", idx),
                &[n_cols],
                &[row.len()],
            ));
        }
        flat.extend_from_slice(row);
    }

    Matrix::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|_| NetworkError::dimension("weight matrix", &[n_rows, n_cols], &[n_rows * n_cols]))
}

/// Converts a matrix back into row vectors (row-major order).
pub fn matrix_to_rows(matrix: &Matrix) -> Vec<Vec<TensorData>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Returns `[rows, cols]`, handy for error reporting.
pub fn shape_of(matrix: &Matrix) -> [usize; 2] {
    let (rows, cols) = matrix.dim();
    [rows, cols]
}
