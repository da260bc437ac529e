//! Paddle policy example.
//!
//! Trains a tiny network that maps the vertical distance between a paddle
//! and the ball to two outputs, "move up" and "move down". The trained
//! network is written to a JSON file, loaded back, and the reloaded copy is
//! used to pick moves.
//!
//! Run with: cargo run --example paddle_policy

use ffnet::prelude::*;
use ffnet::utils::serialization;
use tracing::Level;

const FIELD_HEIGHT: f64 = 400.0;

/// Signed distance from paddle centre to ball, scaled to roughly [-1, 1].
fn observe(paddle_y: f64, ball_y: f64) -> Vec<f64> {
    vec![(paddle_y - ball_y) / FIELD_HEIGHT]
}

/// Screen coordinates grow downwards: a paddle below the ball moves up.
fn expert_move(paddle_y: f64, ball_y: f64) -> Vec<f64> {
    if paddle_y > ball_y {
        vec![1.0, 0.0]
    } else {
        vec![0.0, 1.0]
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let structure = Structure::from_specs(&[
        LayerSpec::input(1),
        LayerSpec::layer(6, "tanh"),
        LayerSpec::layer(2, "sigmoid"),
    ])?;
    let mut network = Network::seeded(&structure, WeightInit::Xavier, 2024)?;

    let samples: Vec<Sample> = (0..40)
        .map(|i| {
            let paddle_y = 200.0;
            let ball_y = 5.0 + 10.0 * i as f64;
            Sample::new(observe(paddle_y, ball_y), expert_move(paddle_y, ball_y))
        })
        .collect();

    let mut sgd = Sgd::new(0.3)?.with_log_every(500);
    let losses = sgd.fit(&mut network, &samples, 3000)?;
    println!("Trained {} epochs, final loss {:.6}", losses.len(), losses.last().copied().unwrap_or(f64::NAN));

    let path = std::env::temp_dir().join("paddle_policy.json");
    serialization::save(&network, &path)?;
    let mut reloaded = serialization::load(&path)?;
    println!("Saved and reloaded network from {}", path.display());

    for (paddle_y, ball_y) in [(300.0, 50.0), (120.0, 130.0), (20.0, 380.0), (210.0, 180.0)] {
        let out = reloaded.forward(&observe(paddle_y, ball_y))?;
        let decision = if out[0] > out[1] { "up" } else { "down" };
        println!(
            "paddle {:>5.1} ball {:>5.1} -> up {:.3} down {:.3} => {}",
            paddle_y, ball_y, out[0], out[1], decision
        );
    }

    Ok(())
}
