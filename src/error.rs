//! # Error Types
//!
//! The failure taxonomy shared by every part of the network engine.
//! All of these are surfaced to the caller at the point of detection; the
//! engine never coerces, clamps or substitutes defaults.

/// Errors raised while building, running or training a [`Network`](crate::nn::Network).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Invalid activation name \"{name}\". Try: none, sigmoid, swish, tanh, relu, leaky_relu, softplus")]
    InvalidActivationName { name: String },

    #[error("Invalid weights initialization \"{name}\". Choose from random, xavier, he, lecun")]
    InvalidInitializationStrategy { name: String },

    #[error("Dimension mismatch in {context}: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        context: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Invalid value for {context}: {value} is not a finite number")]
    InvalidValueType { context: String, value: f64 },

    #[error("Invalid network structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),
}

impl NetworkError {
    pub(crate) fn dimension(context: impl Into<String>, expected: &[usize], got: &[usize]) -> Self {
        NetworkError::DimensionMismatch {
            context: context.into(),
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Rejects NaN and infinities where a usable scalar is required.
pub(crate) fn check_finite(context: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NetworkError::InvalidValueType {
            context: context.to_string(),
            value,
        })
    }
}

/// Slice version of [`check_finite`], reporting the first offending element.
pub(crate) fn check_all_finite(context: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(NetworkError::InvalidValueType {
            context: format!("{}[{}]", context, idx),
            value: values[idx],
        }),
        None => Ok(()),
    }
}
