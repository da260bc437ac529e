//! # Parallelism Utilities (CPU Threading)
//!
//! A single network is always trained sequentially. What can run in
//! parallel is a group of independently owned networks, e.g. several seeds
//! of the same structure, since they share no weights and need no ordering
//! between them.

use rayon::prelude::*;

use crate::error::Result;
use crate::nn::{Network, Structure, WeightInit};
use crate::optim::{Optimizer, Sample};
use crate::tensor::TensorData;

/// Builds one network per seed, in parallel.
pub fn seeded_ensemble(structure: &Structure, init: WeightInit, seeds: &[u64]) -> Result<Vec<Network>> {
    seeds
        .par_iter()
        .map(|&seed| Network::seeded(structure, init, seed))
        .collect()
}

/// Fits every network on the same samples, each with its own copy of `optimizer`.
///
/// Returns the per-epoch losses of each network, in input order. A failure in
/// one network does not stop the others.
pub fn fit_independent<O>(
    networks: &mut [Network],
    optimizer: &O,
    samples: &[Sample],
    epochs: usize,
) -> Vec<Result<Vec<TensorData>>>
where
    O: Optimizer + Clone + Send + Sync,
{
    networks
        .par_iter_mut()
        .map(|network| {
            let mut optimizer = optimizer.clone();
            optimizer.fit(network, samples, epochs)
        })
        .collect()
}

/// Index and final-epoch loss of the best trained network.
pub fn best_of(results: &[Result<Vec<TensorData>>]) -> Option<(usize, TensorData)> {
    results
        .iter()
        .enumerate()
        .filter_map(|(idx, result)| match result {
            Ok(losses) => losses.last().map(|&loss| (idx, loss)),
            Err(_) => None,
        })
        .filter(|(_, loss)| loss.is_finite())
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
