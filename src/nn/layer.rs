//! # Layer
//!
//! A fixed-width row of neurons sharing one activation. Raw accumulators and
//! biases are held as parallel flat buffers indexed by neuron position.

use ndarray::ArrayView1;

use super::activation::Activation;
use super::neuron::{Neuron, NeuronMut};
use crate::error::{check_all_finite, NetworkError, Result};
use crate::tensor::{ops, shape_of, Matrix, TensorData, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    activation: Activation,
    raw: Vector,    // Pre-activation accumulators, written by `set_values`
    biases: Vector, // Trainable, one per neuron
}

impl Layer {
    /// Creates a layer of `width` neurons with zero raw values and zero biases.
    pub fn new(width: usize, activation: Activation) -> Result<Self> {
        if width == 0 {
            return Err(NetworkError::InvalidStructure(
                "layer width must be at least 1".to_string(),
            ));
        }
        Ok(Layer {
            activation,
            raw: Vector::zeros(width),
            biases: Vector::zeros(width),
        })
    }

    /// Number of neurons.
    pub fn width(&self) -> usize {
        self.raw.len()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn raw(&self) -> &[TensorData] {
        self.raw.as_slice().unwrap_or(&[])
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [TensorData] {
        self.raw.as_slice_mut().unwrap_or(&mut [])
    }

    pub fn biases(&self) -> &[TensorData] {
        self.biases.as_slice().unwrap_or(&[])
    }

    pub(crate) fn biases_mut(&mut self) -> &mut [TensorData] {
        self.biases.as_slice_mut().unwrap_or(&mut [])
    }

    pub fn neuron(&self, index: usize) -> Option<Neuron<'_>> {
        (index < self.width()).then(|| Neuron::new(self, index))
    }

    pub fn neuron_mut(&mut self, index: usize) -> Option<NeuronMut<'_>> {
        if index < self.width() {
            Some(NeuronMut::new(self, index))
        } else {
            None
        }
    }

    /// Replaces every bias. Requires exactly one bias per neuron.
    pub fn set_biases(&mut self, biases: &[TensorData]) -> Result<()> {
        if biases.len() != self.width() {
            return Err(NetworkError::dimension(
                "layer biases",
                &[self.width()],
                &[biases.len()],
            ));
        }
        check_all_finite("layer bias", biases)?;
        self.biases.assign(&ArrayView1::from(biases));
        Ok(())
    }

    /// Computes `input · weights` and stores it as the raw accumulators.
    ///
    /// `weights` must be `(len(input), width)`.
    pub fn set_values(&mut self, input: ArrayView1<'_, TensorData>, weights: &Matrix) -> Result<()> {
        if weights.ncols() != self.width() || weights.nrows() != input.len() {
            return Err(NetworkError::dimension(
                "layer weight matrix",
                &[input.len(), self.width()],
                &shape_of(weights),
            ));
        }
        self.raw = ops::vec_mat(input, weights)?;
        Ok(())
    }

    /// Activated value of every neuron, in order.
    pub fn values(&self) -> Vector {
        let activation = self.activation;
        ndarray::Zip::from(&self.raw)
            .and(&self.biases)
            .map_collect(|&raw, &bias| activation.value(raw, bias))
    }

    /// Activation slope at each neuron's current pre-activation point.
    pub(crate) fn slopes(&self) -> Vector {
        let activation = self.activation;
        ndarray::Zip::from(&self.raw)
            .and(&self.biases)
            .map_collect(|&raw, &bias| activation.slope(raw, bias))
    }

    /// `biases += alpha * delta`
    pub(crate) fn add_to_biases(&mut self, alpha: TensorData, delta: ArrayView1<'_, TensorData>) -> Result<()> {
        if delta.len() != self.width() {
            return Err(NetworkError::dimension(
                "bias update",
                &[self.width()],
                &[delta.len()],
            ));
        }
        self.biases.scaled_add(alpha, &delta);
        Ok(())
    }
}
