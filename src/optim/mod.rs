//! # Optimization (`optim`)
//!
//! Drives repeated training steps over a set of examples.

use crate::error::{NetworkError, Result};
use crate::nn::Network;
use crate::tensor::TensorData;

// --- Submodules ---
pub mod sgd;

// Re-export optimizers
pub use sgd::Sgd;

/// One training example: an input vector and the output it should produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<TensorData>,
    pub target: Vec<TensorData>,
}

impl Sample {
    pub fn new(input: Vec<TensorData>, target: Vec<TensorData>) -> Self {
        Sample { input, target }
    }
}

/// Base trait for optimizers.
pub trait Optimizer {
    /// Trains `network` on one example and returns that example's loss.
    fn step(&mut self, network: &mut Network, sample: &Sample) -> Result<TensorData>;

    /// Interval, in epochs, between progress log lines. `0` disables them.
    fn log_every(&self) -> usize {
        0
    }

    /// Runs `epochs` passes over `samples`, returning the mean loss of each epoch.
    fn fit(&mut self, network: &mut Network, samples: &[Sample], epochs: usize) -> Result<Vec<TensorData>> {
        if samples.is_empty() {
            return Err(NetworkError::InvalidHyperparameter(
                "cannot fit on an empty sample set".to_string(),
            ));
        }

        let mut epoch_losses = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            let mut epoch_loss = 0.0;
            for sample in samples {
                epoch_loss += self.step(network, sample)?;
            }
            epoch_loss /= samples.len() as TensorData;

            if !epoch_loss.is_finite() {
                tracing::warn!(epoch = epoch + 1, "training loss is no longer finite");
            }
            let every = self.log_every();
            if every > 0 && (epoch + 1) % every == 0 {
                tracing::debug!("Epoch {}: loss = {:.6}", epoch + 1, epoch_loss);
            }
            epoch_losses.push(epoch_loss);
        }
        Ok(epoch_losses)
    }
}
