//! Configuration structures for training
//!
//! A training run is described by a JSON file naming the network structure,
//! the weight initialization, and the gradient-descent settings.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::NetworkError;
use crate::nn::{LayerSpec, Network, Structure, WeightInit};
use crate::optim::Sgd;
use crate::tensor::TensorData;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

fn default_initialization() -> String {
    WeightInit::default().name().to_string()
}

fn default_log_every() -> usize {
    1000
}

/// Configuration for a training run.
///
/// # Example
///
/// ```json
/// {
///   "structure": [
///     {"neurons": 2},
///     {"neurons": 4, "function": "sigmoid"},
///     {"neurons": 1, "function": "sigmoid"}
///   ],
///   "weights_initialization": "xavier",
///   "learning_rate": 0.5,
///   "epochs": 10000,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Input width first, then one entry per layer
    pub structure: Vec<LayerSpec>,

    /// "random", "xavier", "he" or "lecun" (default "random")
    #[serde(default = "default_initialization")]
    pub weights_initialization: String,

    /// Step size of every backpropagation update
    pub learning_rate: TensorData,

    /// Number of passes over the training samples
    pub epochs: usize,

    /// Seed for weight initialization; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Epochs between progress log lines (0 disables them)
    #[serde(default = "default_log_every")]
    pub log_every: usize,
}

impl TrainingConfig {
    pub fn parse_structure(&self) -> Result<Structure, ConfigError> {
        Ok(Structure::from_specs(&self.structure)?)
    }

    pub fn initialization(&self) -> Result<WeightInit, ConfigError> {
        Ok(self.weights_initialization.parse::<WeightInit>()?)
    }

    /// Builds a freshly initialized network, seeded when `seed` is set.
    pub fn build_network(&self) -> Result<Network, ConfigError> {
        let structure = self.parse_structure()?;
        let init = self.initialization()?;
        let network = match self.seed {
            Some(seed) => Network::seeded(&structure, init, seed)?,
            None => Network::new(&structure, init, &mut rand::thread_rng())?,
        };
        Ok(network)
    }

    pub fn optimizer(&self) -> Result<Sgd, ConfigError> {
        Ok(Sgd::new(self.learning_rate)?.with_log_every(self.log_every))
    }
}

/// Loads a training configuration from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use ffnet::config::load_config;
///
/// let cfg = load_config("config/xor.json").unwrap();
/// assert!(cfg.epochs > 0);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses and validates a configuration held in memory.
pub fn parse_config(contents: &str) -> Result<TrainingConfig, ConfigError> {
    let config: TrainingConfig = serde_json::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TrainingConfig) -> Result<(), ConfigError> {
    config.parse_structure()?;
    config.initialization()?;

    if !config.learning_rate.is_finite() || config.learning_rate <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "learning_rate must be positive, got {}",
            config.learning_rate
        )));
    }

    if config.epochs == 0 {
        return Err(ConfigError::Invalid("epochs must be at least 1".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const XOR: &str = r#"{
        "structure": [
            {"neurons": 2},
            {"neurons": 4, "function": "sigmoid"},
            {"neurons": 1, "function": "sigmoid"}
        ],
        "weights_initialization": "xavier",
        "learning_rate": 0.5,
        "epochs": 100,
        "seed": 42
    }"#;

    #[test]
    fn test_parse_valid_config() {
        let cfg = parse_config(XOR).unwrap();
        assert_eq!(cfg.structure.len(), 3);
        assert_eq!(cfg.initialization().unwrap(), WeightInit::Xavier);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.log_every, 1000);
    }

    #[test]
    fn test_defaults() {
        let cfg = parse_config(
            r#"{"structure": [{"neurons": 1}, {"neurons": 1, "function": "relu"}],
                "learning_rate": 0.1, "epochs": 1}"#,
        )
        .unwrap();
        assert_eq!(cfg.weights_initialization, "random");
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let cfg = parse_config(XOR).unwrap();
        assert_eq!(cfg.build_network().unwrap(), cfg.build_network().unwrap());
    }

    #[test]
    fn test_invalid_values() {
        let bad_lr = XOR.replace("\"learning_rate\": 0.5", "\"learning_rate\": -1.0");
        assert!(matches!(parse_config(&bad_lr), Err(ConfigError::Invalid(_))));

        let bad_epochs = XOR.replace("\"epochs\": 100", "\"epochs\": 0");
        assert!(matches!(parse_config(&bad_epochs), Err(ConfigError::Invalid(_))));

        let bad_init = XOR.replace("xavier", "bogus");
        assert!(matches!(
            parse_config(&bad_init),
            Err(ConfigError::Network(NetworkError::InvalidInitializationStrategy { .. }))
        ));

        let bad_activation = XOR.replace(
            "\"neurons\": 1, \"function\": \"sigmoid\"",
            "\"neurons\": 1, \"function\": \"bogus\"",
        );
        assert!(matches!(
            parse_config(&bad_activation),
            Err(ConfigError::Network(NetworkError::InvalidActivationName { .. }))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_config("{ not json"), Err(ConfigError::Json(_))));
    }
}
