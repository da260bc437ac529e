//! # Neural Network Module (`nn`)
//!
//! Building blocks of the fully-connected feed-forward network: the
//! activation registry, weight initialization strategies, layers with their
//! neuron views, and the network that owns them.

// --- Submodules ---
pub mod activation;
pub mod init;
pub mod layer;
pub mod loss;
pub mod network;
pub mod neuron;
pub mod structure;

// Re-export common items
pub use activation::Activation;
pub use init::WeightInit;
pub use layer::Layer;
pub use loss::mse_loss;
pub use network::Network;
pub use neuron::{Neuron, NeuronMut};
pub use structure::{LayerSpec, Structure};
