//! # Model Serialization Utilities
//!
//! Saving and loading networks. The interchange format is a JSON document
//! with a `structure`, the `weights` (one nested row array per layer
//! transition) and optional `biases`. A compact `bincode` snapshot of the
//! same data is available for local checkpoints.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::nn::{LayerSpec, Network, Structure, WeightInit};
use crate::tensor::{matrix_from_rows, matrix_to_rows, TensorData};

// --- Error Type ---
#[derive(thiserror::Error, Debug)]
pub enum SerializationError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error (JSON): {0}")]
    Json(#[from] serde_json::Error),
    #[error("Serialization Error (Bincode): {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Invalid network document: {0}")]
    Network(#[from] NetworkError),
}

// --- Persisted Document ---

/// The persisted form of a network.
///
/// ```json
/// {
///   "structure": [{"neurons": 1}, {"neurons": 4, "function": "tanh"}, {"neurons": 2, "function": "relu"}],
///   "weights": [[[0.1, -0.2, 0.3, 0.0]], [[0.5, 0.1], [0.2, 0.3], [0.0, 0.1], [0.9, 0.4]]],
///   "biases": [[0.0, 0.0, 0.0, 0.0], [0.0, 0.0]]
/// }
/// ```
///
/// When `weights` is absent or empty, a network built from the document draws
/// fresh weights with `weights_initialization` (default `"random"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    pub structure: Vec<LayerSpec>,
    #[serde(default)]
    pub weights: Vec<Vec<Vec<TensorData>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights_initialization: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub biases: Vec<Vec<TensorData>>,
}

impl NetworkState {
    /// Builds the network this document describes, drawing from `rng` only
    /// if the document carries no weights.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network, NetworkError> {
        let structure = Structure::from_specs(&self.structure)?;
        let init = self
            .weights_initialization
            .as_deref()
            .map(str::parse::<WeightInit>)
            .transpose()?
            .unwrap_or_default();

        let mut network = if self.weights.is_empty() {
            Network::new(&structure, init, rng)?
        } else {
            let weights = self
                .weights
                .iter()
                .map(|rows| matrix_from_rows(rows))
                .collect::<Result<Vec<_>, _>>()?;
            Network::with_weights(&structure, weights, None)?
        };

        if !self.biases.is_empty() {
            network.set_biases(&self.biases)?;
        }
        Ok(network)
    }

    /// [`NetworkState::build_with_rng`] using the thread-local generator.
    pub fn build(&self) -> Result<Network, NetworkError> {
        self.build_with_rng(&mut rand::thread_rng())
    }
}

impl Network {
    /// Captures structure, weights and biases.
    pub fn to_state(&self) -> NetworkState {
        NetworkState {
            structure: self.structure().to_specs(),
            weights: self.weights().iter().map(matrix_to_rows).collect(),
            weights_initialization: None,
            biases: self.biases(),
        }
    }

    pub fn from_state(state: &NetworkState) -> Result<Self, NetworkError> {
        state.build()
    }
}

// --- JSON ---

pub fn to_json(network: &Network) -> Result<String, SerializationError> {
    Ok(serde_json::to_string_pretty(&network.to_state())?)
}

pub fn from_json(json: &str) -> Result<Network, SerializationError> {
    let state: NetworkState = serde_json::from_str(json)?;
    Ok(state.build()?)
}

/// Writes the network document to `path` as JSON.
pub fn save<P: AsRef<Path>>(network: &Network, path: P) -> Result<(), SerializationError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &network.to_state())?;
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), "saved network");
    Ok(())
}

/// Reads a JSON network document from `path` and builds the network.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Network, SerializationError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let state: NetworkState = serde_json::from_reader(reader)?;
    let network = state.build()?;
    tracing::info!(
        path = %path.as_ref().display(),
        parameters = network.parameter_count(),
        "loaded network"
    );
    Ok(network)
}

// --- Binary snapshot ---

// bincode is not self-describing, so optional/skipped fields are spelled out here.
#[derive(Serialize, Deserialize, Debug)]
struct BinarySnapshot {
    inputs: usize,
    layers: Vec<(usize, String)>,
    weights: Vec<Vec<Vec<TensorData>>>,
    biases: Vec<Vec<TensorData>>,
}

impl BinarySnapshot {
    fn from_network(network: &Network) -> Self {
        let structure = network.structure();
        BinarySnapshot {
            inputs: structure.inputs(),
            layers: structure
                .layers()
                .iter()
                .map(|&(width, activation)| (width, activation.name().to_string()))
                .collect(),
            weights: network.weights().iter().map(matrix_to_rows).collect(),
            biases: network.biases(),
        }
    }

    fn into_state(self) -> NetworkState {
        let structure = std::iter::once(LayerSpec::input(self.inputs))
            .chain(
                self.layers
                    .into_iter()
                    .map(|(width, function)| LayerSpec::layer(width, function)),
            )
            .collect();
        NetworkState {
            structure,
            weights: self.weights,
            weights_initialization: None,
            biases: self.biases,
        }
    }
}

pub fn save_binary<P: AsRef<Path>>(network: &Network, path: P) -> Result<(), SerializationError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &BinarySnapshot::from_network(network))?;
    writer.flush()?;
    tracing::info!(path = %path.as_ref().display(), "saved binary snapshot");
    Ok(())
}

pub fn load_binary<P: AsRef<Path>>(path: P) -> Result<Network, SerializationError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let snapshot: BinarySnapshot = bincode::deserialize_from(reader)?;
    if snapshot.weights.is_empty() {
        return Err(NetworkError::InvalidStructure("binary snapshot has no weights".to_string()).into());
    }
    Ok(snapshot.into_state().build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::Activation;

    const DOCUMENT: &str = r#"{
        "structure": [{"neurons": 2}, {"neurons": 2, "function": "none"}],
        "weights": [[[1.0, 0.0], [0.0, 1.0]]],
        "biases": [[0.0, 0.0]]
    }"#;

    #[test]
    fn test_from_json_document() {
        let mut net = from_json(DOCUMENT).unwrap();
        assert_eq!(net.input_width(), 2);
        assert_eq!(net.layers()[0].activation(), Activation::None);
        assert_eq!(net.forward(&[3.5, -1.25]).unwrap(), vec![3.5, -1.25]);
    }

    #[test]
    fn test_biases_are_optional() {
        let doc = r#"{
            "structure": [{"neurons": 1}, {"neurons": 1, "function": "relu"}],
            "weights": [[[2.0]]]
        }"#;
        let net = from_json(doc).unwrap();
        assert_eq!(net.biases(), vec![vec![0.0]]);
    }

    #[test]
    fn test_missing_weights_use_initialization() {
        let doc = r#"{
            "structure": [{"neurons": 3}, {"neurons": 4, "function": "tanh"}],
            "weights_initialization": "xavier"
        }"#;
        let state: NetworkState = serde_json::from_str(doc).unwrap();
        let net = state.build().unwrap();
        let limit = (6.0f64 / 7.0).sqrt();
        assert_eq!(net.weights()[0].dim(), (3, 4));
        assert!(net.weights()[0].iter().all(|w| w.abs() <= limit));
    }

    #[test]
    fn test_bogus_names_fail_to_build() {
        let doc = r#"{
            "structure": [{"neurons": 1}, {"neurons": 1, "function": "relu"}],
            "weights_initialization": "bogus"
        }"#;
        match from_json(doc) {
            Err(SerializationError::Network(NetworkError::InvalidInitializationStrategy { name })) => {
                assert_eq!(name, "bogus")
            }
            other => panic!("unexpected result {:?}", other),
        }

        let doc = r#"{"structure": [{"neurons": 1}, {"neurons": 1, "function": "bogus"}]}"#;
        assert!(matches!(
            from_json(doc),
            Err(SerializationError::Network(NetworkError::InvalidActivationName { .. }))
        ));
    }

    #[test]
    fn test_wrong_weight_shape_is_rejected() {
        let doc = r#"{
            "structure": [{"neurons": 2}, {"neurons": 1, "function": "sigmoid"}],
            "weights": [[[1.0, 2.0]]]
        }"#;
        assert!(matches!(
            from_json(doc),
            Err(SerializationError::Network(NetworkError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_non_numeric_weight_is_rejected() {
        let doc = r#"{
            "structure": [{"neurons": 1}, {"neurons": 1, "function": "sigmoid"}],
            "weights": [[["heavy"]]]
        }"#;
        assert!(matches!(from_json(doc), Err(SerializationError::Json(_))));
    }

    #[test]
    fn test_state_omits_empty_fields() {
        let net = from_json(DOCUMENT).unwrap();
        let value = serde_json::to_value(net.to_state()).unwrap();
        assert!(value.get("weights_initialization").is_none());
        assert_eq!(value["structure"][0], serde_json::json!({"neurons": 2}));
        assert_eq!(value["weights"][0], serde_json::json!([[1.0, 0.0], [0.0, 1.0]]));
    }
}
