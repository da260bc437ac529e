//! # Stochastic Gradient Descent (SGD) Optimizer

use super::{Optimizer, Sample};
use crate::error::{NetworkError, Result};
use crate::nn::Network;
use crate::tensor::TensorData;

/// Plain per-example gradient descent: every sample triggers one
/// [`Network::backpropagate`] call with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    lr: TensorData,
    log_every: usize,
}

impl Sgd {
    /// Creates a new SGD optimizer. The learning rate must be finite and positive.
    pub fn new(lr: TensorData) -> Result<Self> {
        if !lr.is_finite() || lr <= 0.0 {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "Invalid learning rate: {}",
                lr
            )));
        }
        Ok(Sgd { lr, log_every: 0 })
    }

    /// Log the epoch loss every `every` epochs (`0` = never).
    pub fn with_log_every(mut self, every: usize) -> Self {
        self.log_every = every;
        self
    }

    pub fn learning_rate(&self) -> TensorData {
        self.lr
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, network: &mut Network, sample: &Sample) -> Result<TensorData> {
        network.backpropagate(&sample.input, &sample.target, self.lr)
    }

    fn log_every(&self) -> usize {
        self.log_every
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::{Activation, Structure, WeightInit};

    #[test]
    fn test_invalid_learning_rates() {
        assert!(Sgd::new(0.0).is_err());
        assert!(Sgd::new(-0.5).is_err());
        assert!(Sgd::new(f64::INFINITY).is_err());
        assert_eq!(Sgd::new(0.25).unwrap().learning_rate(), 0.25);
    }

    #[test]
    fn test_fit_returns_one_loss_per_epoch() {
        let s = Structure::new(1, vec![(1, Activation::Sigmoid)]).unwrap();
        let mut net = Network::seeded(&s, WeightInit::Xavier, 9).unwrap();
        let samples = vec![Sample::new(vec![1.0], vec![1.0]), Sample::new(vec![-1.0], vec![0.0])];

        let mut sgd = Sgd::new(1.0).unwrap().with_log_every(10);
        let losses = sgd.fit(&mut net, &samples, 200).unwrap();
        assert_eq!(losses.len(), 200);
        assert!(losses[199] < losses[0]);
    }

    #[test]
    fn test_fit_rejects_empty_samples() {
        let s = Structure::new(1, vec![(1, Activation::Sigmoid)]).unwrap();
        let mut net = Network::seeded(&s, WeightInit::Random, 1).unwrap();
        let mut sgd = Sgd::new(0.1).unwrap();
        assert!(sgd.fit(&mut net, &[], 10).is_err());
    }

    #[test]
    fn test_fit_propagates_shape_errors() {
        let s = Structure::new(2, vec![(1, Activation::Sigmoid)]).unwrap();
        let mut net = Network::seeded(&s, WeightInit::Random, 1).unwrap();
        let mut sgd = Sgd::new(0.1).unwrap();
        let bad = vec![Sample::new(vec![1.0], vec![1.0])];
        assert!(matches!(
            sgd.fit(&mut net, &bad, 1),
            Err(NetworkError::DimensionMismatch { .. })
        ));
    }
}
