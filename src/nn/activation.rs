//! # Activation Functions
//!
//! The closed set of scalar activations a layer can use, together with the
//! derivative each one contributes to backpropagation. Names are resolved once,
//! when a network is built; the forward and backward passes only ever match on
//! the enum.

use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;
use crate::tensor::TensorData;

/// Slope applied to negative inputs by [`Activation::LeakyRelu`].
pub const LEAKY_RELU_SLOPE: TensorData = 0.01;

/// Activation kind shared by every neuron of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Passthrough: the neuron's value is its raw accumulator (bias cancels out).
    None,
    Sigmoid,
    Swish,
    Tanh,
    Relu,
    LeakyRelu,
    Softplus,
}

impl Activation {
    /// Every recognised activation, in registry order.
    pub const ALL: [Activation; 7] = [
        Activation::None,
        Activation::Sigmoid,
        Activation::Swish,
        Activation::Tanh,
        Activation::Relu,
        Activation::LeakyRelu,
        Activation::Softplus,
    ];

    /// The registry name, as written in structure documents.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::None => "none",
            Activation::Sigmoid => "sigmoid",
            Activation::Swish => "swish",
            Activation::Tanh => "tanh",
            Activation::Relu => "relu",
            Activation::LeakyRelu => "leaky_relu",
            Activation::Softplus => "softplus",
        }
    }

    /// Applies the function to a pre-activation value `x`.
    ///
    /// For [`Activation::None`] this is the identity; use [`Activation::value`]
    /// to get the neuron-level semantics where the bias is cancelled.
    pub fn apply(&self, x: TensorData) -> TensorData {
        match self {
            Activation::None => x,
            Activation::Sigmoid => sigmoid(x),
            Activation::Swish => x * sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::Relu => x.max(0.0),
            Activation::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    x * LEAKY_RELU_SLOPE
                }
            }
            Activation::Softplus => softplus(x),
        }
    }

    /// Derivative of [`Activation::apply`] with respect to its input `x`.
    pub fn derivative(&self, x: TensorData) -> TensorData {
        match self {
            Activation::None => 1.0,
            Activation::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Activation::Swish => {
                let s = sigmoid(x);
                s + x * s * (1.0 - s)
            }
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::LeakyRelu => {
                if x > 0.0 {
                    1.0
                } else {
                    LEAKY_RELU_SLOPE
                }
            }
            Activation::Softplus => sigmoid(x),
        }
    }

    /// Activated value of a neuron holding `raw` and `bias`.
    ///
    /// `none` is defined as `f(x) = x - bias` evaluated at `x = raw + bias`,
    /// so its value is exactly the raw accumulator.
    pub fn value(&self, raw: TensorData, bias: TensorData) -> TensorData {
        match self {
            Activation::None => raw,
            _ => self.apply(raw + bias),
        }
    }

    /// Slope used by backpropagation for a neuron holding `raw` and `bias`.
    pub fn slope(&self, raw: TensorData, bias: TensorData) -> TensorData {
        self.derivative(raw + bias)
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Sigmoid
    }
}

impl FromStr for Activation {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Activation::ALL
            .iter()
            .copied()
            .find(|activation| activation.name() == name)
            .ok_or_else(|| NetworkError::InvalidActivationName {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Scalar helpers ---

/// `sigmoid(x) = 1 / (1 + exp(-x))`
pub fn sigmoid(x: TensorData) -> TensorData {
    1.0 / (1.0 + (-x).exp())
}

/// `softplus(x) = ln(1 + exp(x))`, written so large inputs do not overflow.
pub fn softplus(x: TensorData) -> TensorData {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}
