//! # Neuron Views
//!
//! A layer keeps its neurons as parallel flat buffers. `Neuron` and
//! `NeuronMut` expose one position of those buffers as a single unit.

use super::activation::Activation;
use super::layer::Layer;
use crate::error::{check_finite, Result};
use crate::tensor::TensorData;

/// Read-only view of neuron `index` in a layer.
#[derive(Debug, Clone, Copy)]
pub struct Neuron<'a> {
    layer: &'a Layer,
    index: usize,
}

impl<'a> Neuron<'a> {
    pub(crate) fn new(layer: &'a Layer, index: usize) -> Self {
        Neuron { layer, index }
    }

    /// Pre-activation accumulator left by the last value assignment.
    pub fn raw(&self) -> TensorData {
        self.layer.raw()[self.index]
    }

    pub fn bias(&self) -> TensorData {
        self.layer.biases()[self.index]
    }

    pub fn activation(&self) -> Activation {
        self.layer.activation()
    }

    /// `activation(raw + bias)`
    pub fn value(&self) -> TensorData {
        self.activation().value(self.raw(), self.bias())
    }
}

/// Mutable view of neuron `index` in a layer.
#[derive(Debug)]
pub struct NeuronMut<'a> {
    layer: &'a mut Layer,
    index: usize,
}

impl<'a> NeuronMut<'a> {
    pub(crate) fn new(layer: &'a mut Layer, index: usize) -> Self {
        NeuronMut { layer, index }
    }

    pub fn raw(&self) -> TensorData {
        self.layer.raw()[self.index]
    }

    pub fn bias(&self) -> TensorData {
        self.layer.biases()[self.index]
    }

    pub fn value(&self) -> TensorData {
        self.layer.activation().value(self.raw(), self.bias())
    }

    /// Stores `x` as the pre-activation accumulator.
    pub fn set_raw(&mut self, x: TensorData) -> Result<()> {
        let x = check_finite("neuron raw value", x)?;
        self.layer.raw_mut()[self.index] = x;
        Ok(())
    }

    pub fn set_bias(&mut self, bias: TensorData) -> Result<()> {
        let bias = check_finite("neuron bias", bias)?;
        self.layer.biases_mut()[self.index] = bias;
        Ok(())
    }
}
