//! # Feed-Forward Network
//!
//! An ordered list of layers plus one weight matrix per layer transition.
//! The input layer is virtual: it contributes only its width, so
//! `weights.len() == layers.len()` and `weights[i]` has shape
//! `(width of layer i-1 or input width, width of layer i)`.

use ndarray::{ArrayView1, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::init::WeightInit;
use super::layer::Layer;
use super::loss::mse_loss;
use super::structure::Structure;
use crate::error::{check_all_finite, check_finite, NetworkError, Result};
use crate::tensor::{ops, shape_of, Matrix, TensorData, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    input_width: usize,
    layers: Vec<Layer>,
    weights: Vec<Matrix>,
}

impl Network {
    /// Builds a network and draws its weights with `init`. Biases start at zero.
    pub fn new<R: Rng + ?Sized>(structure: &Structure, init: WeightInit, rng: &mut R) -> Result<Self> {
        let weights = structure
            .weight_shapes()
            .into_iter()
            .map(|(fan_in, fan_out)| init.sample(fan_in, fan_out, &mut *rng))
            .collect();
        let network = Self::assemble(structure, weights)?;
        tracing::debug!(
            inputs = network.input_width,
            layers = ?network.widths(),
            init = %init,
            "initialized network"
        );
        Ok(network)
    }

    /// Same as [`Network::new`] with a private generator seeded from `seed`.
    pub fn seeded(structure: &Structure, init: WeightInit, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(structure, init, &mut rng)
    }

    /// Builds a network from pre-existing weights and, optionally, biases.
    ///
    /// Without biases every bias is zero.
    pub fn with_weights(
        structure: &Structure,
        weights: Vec<Matrix>,
        biases: Option<&[Vec<TensorData>]>,
    ) -> Result<Self> {
        let mut network = Self::assemble(structure, weights)?;
        if let Some(biases) = biases {
            network.set_biases(biases)?;
        }
        tracing::debug!(
            inputs = network.input_width,
            layers = ?network.widths(),
            "loaded network"
        );
        Ok(network)
    }

    fn assemble(structure: &Structure, weights: Vec<Matrix>) -> Result<Self> {
        let layers = structure
            .layers()
            .iter()
            .map(|&(width, activation)| Layer::new(width, activation))
            .collect::<Result<Vec<_>>>()?;
        let mut network = Network {
            input_width: structure.inputs(),
            layers,
            weights: Vec::new(),
        };
        network.set_weights(weights)?;
        Ok(network)
    }

    // --- Accessors ---

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, Layer::width)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// One bias vector per layer, input side first.
    pub fn biases(&self) -> Vec<Vec<TensorData>> {
        self.layers.iter().map(|layer| layer.biases().to_vec()).collect()
    }

    pub fn structure(&self) -> Structure {
        let layers = self
            .layers
            .iter()
            .map(|layer| (layer.width(), layer.activation()))
            .collect();
        Structure::from_validated(self.input_width, layers)
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        let weights: usize = self.weights.iter().map(Matrix::len).sum();
        let biases: usize = self.layers.iter().map(Layer::width).sum();
        weights + biases
    }

    fn widths(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::width).collect()
    }

    // --- Mutators ---

    /// Replaces every weight matrix. Count and shapes must match the structure.
    pub fn set_weights(&mut self, weights: Vec<Matrix>) -> Result<()> {
        if weights.len() != self.layers.len() {
            return Err(NetworkError::dimension(
                "weight matrix count",
                &[self.layers.len()],
                &[weights.len()],
            ));
        }
        let mut fan_in = self.input_width;
        for (idx, (matrix, layer)) in weights.iter().zip(&self.layers).enumerate() {
            let expected = [fan_in, layer.width()];
            if shape_of(matrix) != expected {
                return Err(NetworkError::dimension(
                    format!("weight matrix {}", idx),
                    &expected,
                    &shape_of(matrix),
                ));
            }
            if let Some(&bad) = matrix.iter().find(|w| !w.is_finite()) {
                return Err(NetworkError::InvalidValueType {
                    context: format!("weight matrix {}", idx),
                    value: bad,
                });
            }
            fan_in = layer.width();
        }
        self.weights = weights;
        Ok(())
    }

    /// Installs one bias vector per layer. Nothing changes if any vector is rejected.
    pub fn set_biases(&mut self, biases: &[Vec<TensorData>]) -> Result<()> {
        if biases.len() != self.layers.len() {
            return Err(NetworkError::dimension(
                "bias vector count",
                &[self.layers.len()],
                &[biases.len()],
            ));
        }
        for (idx, (layer_biases, layer)) in biases.iter().zip(&self.layers).enumerate() {
            if layer_biases.len() != layer.width() {
                return Err(NetworkError::dimension(
                    format!("biases of layer {}", idx),
                    &[layer.width()],
                    &[layer_biases.len()],
                ));
            }
            check_all_finite(&format!("biases of layer {}", idx), layer_biases)?;
        }
        for (layer, layer_biases) in self.layers.iter_mut().zip(biases) {
            layer.set_biases(layer_biases)?;
        }
        Ok(())
    }

    // --- Propagation ---

    /// Feeds `input` through every layer and returns the output layer's values.
    ///
    /// Every layer's raw accumulators are left holding this pass's values.
    pub fn forward(&mut self, input: &[TensorData]) -> Result<Vec<TensorData>> {
        let output = self.forward_array(ArrayView1::from(input))?;
        Ok(output.to_vec())
    }

    fn forward_array(&mut self, input: ArrayView1<'_, TensorData>) -> Result<Vector> {
        if input.len() != self.input_width {
            return Err(NetworkError::dimension(
                "forward input",
                &[self.input_width],
                &[input.len()],
            ));
        }
        if let Some(&bad) = input.iter().find(|x| !x.is_finite()) {
            return Err(NetworkError::InvalidValueType {
                context: "forward input".to_string(),
                value: bad,
            });
        }

        let mut current = input.to_owned();
        for (layer, weights) in self.layers.iter_mut().zip(&self.weights) {
            layer.set_values(current.view(), weights)?;
            current = layer.values();
        }
        Ok(current)
    }

    /// Trains on a single example with one step of gradient descent.
    ///
    /// Always runs its own forward pass over `input` first, so the raw
    /// accumulators used for the derivatives belong to this example.
    /// Returns the mean squared error of that forward pass.
    pub fn backpropagate(
        &mut self,
        input: &[TensorData],
        target: &[TensorData],
        learning_rate: TensorData,
    ) -> Result<TensorData> {
        let learning_rate = check_finite("learning rate", learning_rate)?;
        if learning_rate < 0.0 {
            return Err(NetworkError::InvalidHyperparameter(format!(
                "learning rate must be non-negative, got {}",
                learning_rate
            )));
        }
        if target.len() != self.output_width() {
            return Err(NetworkError::dimension(
                "backpropagation target",
                &[self.output_width()],
                &[target.len()],
            ));
        }
        check_all_finite("backpropagation target", target)?;

        let input = ArrayView1::from(input);
        let target = ArrayView1::from(target);
        let outputs = self.forward_array(input)?;
        let loss = mse_loss(outputs.view(), target)?;

        // Activated values feeding each layer, captured before anything is updated
        let mut layer_inputs: Vec<Vector> = Vec::with_capacity(self.layers.len());
        layer_inputs.push(input.to_owned());
        for layer in &self.layers[..self.layers.len() - 1] {
            layer_inputs.push(layer.values());
        }

        let mut error = &target - &outputs;
        for idx in (0..self.layers.len()).rev() {
            let mut delta = self.layers[idx].slopes();
            Zip::from(&mut delta).and(&error).for_each(|d, &e| *d *= e);

            // Carry the error back through this matrix before it is updated
            if idx > 0 {
                error = ops::vec_mat_t(delta.view(), &self.weights[idx])?;
            }

            ops::outer_scaled_add(
                &mut self.weights[idx],
                learning_rate,
                layer_inputs[idx].view(),
                delta.view(),
            )?;
            self.layers[idx].add_to_biases(learning_rate, delta.view())?;
        }

        Ok(loss)
    }
}
