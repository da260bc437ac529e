//! XOR training example.
//!
//! Trains a small sigmoid network on XOR using the settings in
//! `config/xor.json`, then prints its predictions and writes the trained
//! network to `xor_network.json`.
//!
//! Run with: cargo run --example xor

use ffnet::config::load_config;
use ffnet::prelude::*;
use ffnet::utils::serialization;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = load_config("config/xor.json")?;
    let mut network = config.build_network()?;
    let mut optimizer = config.optimizer()?;

    let samples = vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ];

    println!("Training XOR network...\n");
    let losses = optimizer.fit(&mut network, &samples, config.epochs)?;
    if let Some(loss) = losses.last() {
        println!("Final loss: {:.6}", loss);
    }

    println!("\nTesting the trained network:");
    for sample in &samples {
        let output = network.forward(&sample.input)?;
        println!(
            "Input: {:.1}, {:.1}, Expected Output: {:.1}, Predicted Output: {:.3}",
            sample.input[0], sample.input[1], sample.target[0], output[0]
        );
    }

    serialization::save(&network, "xor_network.json")?;
    Ok(())
}
