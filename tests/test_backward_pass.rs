use approx::assert_relative_eq;
use ffnet::nn::{Activation, Network, Structure, WeightInit};
use ffnet::optim::{Optimizer, Sample, Sgd};
use ffnet::utils::parallel::{best_of, fit_independent, seeded_ensemble};
use ndarray::array;

fn xor_samples() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ]
}

fn xor_structure() -> Structure {
    Structure::new(2, vec![(8, Activation::Sigmoid), (1, Activation::Sigmoid)]).unwrap()
}

#[test]
fn test_xor_converges() {
    let samples = xor_samples();
    let sgd = Sgd::new(0.5).unwrap();
    let mut nets = seeded_ensemble(&xor_structure(), WeightInit::Xavier, &[42, 7, 1234]).unwrap();

    let results = fit_independent(&mut nets, &sgd, &samples, 20_000);
    let (best, loss) = best_of(&results).expect("at least one run finished");
    assert!(loss < 0.02, "final loss {}", loss);

    let net = &mut nets[best];
    for sample in &samples {
        let out = net.forward(&sample.input).unwrap();
        assert!(
            (out[0] - sample.target[0]).abs() < 0.1,
            "{:?} -> {} (expected {})",
            sample.input,
            out[0],
            sample.target[0]
        );
    }
}

#[test]
fn test_training_reduces_loss() {
    let samples = xor_samples();
    let mut net = Network::seeded(&xor_structure(), WeightInit::Xavier, 42).unwrap();
    let mut sgd = Sgd::new(0.5).unwrap();

    let losses = sgd.fit(&mut net, &samples, 2_000).unwrap();
    assert_eq!(losses.len(), 2_000);
    assert!(losses.iter().all(|l| l.is_finite()));
    assert!(losses[1_999] < losses[0]);
}

#[test]
fn test_zero_learning_rate_changes_nothing() {
    let mut net = Network::seeded(&xor_structure(), WeightInit::He, 5).unwrap();
    let before = net.clone();
    let loss = net.backpropagate(&[1.0, 0.0], &[1.0], 0.0).unwrap();
    assert!(loss > 0.0);
    assert_eq!(net.weights(), before.weights());
    assert_eq!(net.biases(), before.biases());
}

#[test]
fn test_single_step_on_linear_output() {
    // One linear neuron: delta is the plain error and the updates are exact.
    let s = Structure::new(2, vec![(1, Activation::None)]).unwrap();
    let mut net = Network::with_weights(&s, vec![array![[0.5], [-0.5]]], None).unwrap();

    let loss = net.backpropagate(&[1.0, 2.0], &[1.0], 0.1).unwrap();
    // output = 0.5 - 1.0 = -0.5, error = 1.5
    assert_relative_eq!(loss, 2.25, epsilon = 1e-12);
    assert_relative_eq!(net.weights()[0][[0, 0]], 0.5 + 0.1 * 1.5 * 1.0, epsilon = 1e-12);
    assert_relative_eq!(net.weights()[0][[1, 0]], -0.5 + 0.1 * 1.5 * 2.0, epsilon = 1e-12);
    assert_relative_eq!(net.biases()[0][0], 0.15, epsilon = 1e-12);
}

#[test]
fn test_mismatched_target_is_rejected_without_update() {
    let mut net = Network::seeded(&xor_structure(), WeightInit::Random, 9).unwrap();
    let before = net.clone();
    assert!(net.backpropagate(&[0.0, 1.0], &[1.0, 0.0], 0.5).is_err());
    assert!(net.backpropagate(&[0.0, 1.0], &[1.0], f64::NAN).is_err());
    assert_eq!(net.weights(), before.weights());
    assert_eq!(net.biases(), before.biases());
}
