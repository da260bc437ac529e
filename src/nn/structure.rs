//! # Network Structure
//!
//! The shape of a network: an input width followed by one `(width, activation)`
//! pair per layer. `LayerSpec` is the document form (`{"neurons": n, "function": name}`)
//! and `Structure` is the validated, typed form the network is built from.

use serde::{Deserialize, Serialize};

use super::activation::Activation;
use crate::error::{NetworkError, Result};

/// One element of a structure document.
///
/// The first element only carries the input width; every later element
/// also names its activation function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub neurons: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl LayerSpec {
    pub fn input(neurons: usize) -> Self {
        LayerSpec {
            neurons,
            function: None,
        }
    }

    pub fn layer(neurons: usize, function: impl Into<String>) -> Self {
        LayerSpec {
            neurons,
            function: Some(function.into()),
        }
    }
}

/// Validated network shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    inputs: usize,
    layers: Vec<(usize, Activation)>,
}

impl Structure {
    /// Requires a non-zero input width and at least one layer, all of non-zero width.
    pub fn new(inputs: usize, layers: Vec<(usize, Activation)>) -> Result<Self> {
        if inputs == 0 {
            return Err(NetworkError::InvalidStructure(
                "input width must be at least 1".to_string(),
            ));
        }
        if layers.is_empty() {
            return Err(NetworkError::InvalidStructure(
                "a network needs at least one layer after the input".to_string(),
            ));
        }
        if let Some(idx) = layers.iter().position(|&(width, _)| width == 0) {
            return Err(NetworkError::InvalidStructure(format!(
                "layer {} has width 0",
                idx + 1
            )));
        }
        Ok(Structure { inputs, layers })
    }

    /// For shapes read back from an already validated network.
    pub(crate) fn from_validated(inputs: usize, layers: Vec<(usize, Activation)>) -> Self {
        Structure { inputs, layers }
    }

    /// Resolves a structure document, failing on the first unknown activation name.
    pub fn from_specs(specs: &[LayerSpec]) -> Result<Self> {
        let (input, rest) = specs.split_first().ok_or_else(|| {
            NetworkError::InvalidStructure("structure is empty".to_string())
        })?;
        if let Some(function) = &input.function {
            tracing::warn!(function = %function, "activation on the input entry is ignored");
        }

        let mut layers = Vec::with_capacity(rest.len());
        for (idx, spec) in rest.iter().enumerate() {
            let name = spec.function.as_deref().ok_or_else(|| {
                NetworkError::InvalidStructure(format!(
                    "layer {} has no activation function",
                    idx + 1
                ))
            })?;
            layers.push((spec.neurons, name.parse::<Activation>()?));
        }
        Structure::new(input.neurons, layers)
    }

    /// Document form of this structure.
    pub fn to_specs(&self) -> Vec<LayerSpec> {
        std::iter::once(LayerSpec::input(self.inputs))
            .chain(
                self.layers
                    .iter()
                    .map(|&(width, activation)| LayerSpec::layer(width, activation.name())),
            )
            .collect()
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn layers(&self) -> &[(usize, Activation)] {
        &self.layers
    }

    pub fn outputs(&self) -> usize {
        self.layers.last().map_or(0, |&(width, _)| width)
    }

    /// `(fan_in, fan_out)` of each weight matrix, input side first.
    pub fn weight_shapes(&self) -> Vec<(usize, usize)> {
        let mut fan_in = self.inputs;
        self.layers
            .iter()
            .map(|&(width, _)| {
                let shape = (fan_in, width);
                fan_in = width;
                shape
            })
            .collect()
    }
}
