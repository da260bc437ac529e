//! # ffnet
//!
//! A minimal fully-connected feed-forward neural network with
//! backpropagation. Layers, activations and weight initialization are chosen
//! per network from a small structure description; the network itself knows
//! nothing about what its inputs mean.
//!
//! ```
//! use ffnet::nn::{Activation, Network, Structure, WeightInit};
//!
//! let structure = Structure::new(1, vec![(4, Activation::Tanh), (2, Activation::Sigmoid)])?;
//! let mut network = Network::seeded(&structure, WeightInit::Xavier, 7)?;
//! let action = network.forward(&[0.25])?;
//! assert_eq!(action.len(), 2);
//! # Ok::<(), ffnet::NetworkError>(())
//! ```

pub mod config;
pub mod error;
pub mod nn;
pub mod optim;
pub mod tensor;
pub mod utils;

pub use error::{NetworkError, Result};

pub mod prelude {
    pub use crate::error::{NetworkError, Result};
    pub use crate::nn::{Activation, LayerSpec, Network, Structure, WeightInit};
    pub use crate::optim::{Optimizer, Sample, Sgd};
    pub use crate::utils::{NetworkState, SerializationError};
}
