//! # Loss Functions
//!
//! Only used to report how far a training step was from its target; the
//! gradient itself is computed directly from `target - output`.

use ndarray::ArrayView1;

use crate::error::{NetworkError, Result};
use crate::tensor::TensorData;

/// `mean((prediction_i - target_i)^2)`
pub fn mse_loss(
    prediction: ArrayView1<'_, TensorData>,
    target: ArrayView1<'_, TensorData>,
) -> Result<TensorData> {
    if prediction.len() != target.len() {
        return Err(NetworkError::dimension(
            "mse loss",
            &[prediction.len()],
            &[target.len()],
        ));
    }
    if prediction.is_empty() {
        return Ok(0.0);
    }
    let sum: TensorData = prediction
        .iter()
        .zip(target.iter())
        .map(|(p, t)| (p - t) * (p - t))
        .sum();
    Ok(sum / prediction.len() as TensorData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mse_loss() {
        let p = array![1.0, 2.0, 3.0];
        let t = array![1.0, 0.0, 6.0];
        assert_eq!(mse_loss(p.view(), t.view()).unwrap(), (4.0 + 9.0) / 3.0);
    }

    #[test]
    fn test_mse_loss_shape_mismatch() {
        let p = array![1.0, 2.0];
        let t = array![1.0];
        assert!(mse_loss(p.view(), t.view()).is_err());
    }
}
