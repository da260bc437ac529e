//! # Utility Functions (`utils`)
//!
//! Provides helper functions for serialization and parallel training.

pub mod parallel;
pub mod serialization;

pub use serialization::{NetworkState, SerializationError};
