//! # Weight Initialization
//!
//! Strategies for filling a freshly built network's weight matrices.

use std::fmt;
use std::str::FromStr;

use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::Rng;

use crate::error::NetworkError;
use crate::tensor::{Matrix, TensorData};

/// Half-width of the interval used by [`WeightInit::Random`].
pub const RANDOM_LIMIT: TensorData = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeightInit {
    /// Uniform in `[-0.01, 0.01]`.
    #[default]
    Random,
    /// Uniform in `[-L, L]` with `L = sqrt(6 / (fan_in + fan_out))`.
    Xavier,
    /// Standard normal scaled by `sqrt(2 / fan_in)`.
    He,
    /// Standard normal scaled by `sqrt(1 / fan_in)`.
    Lecun,
}

impl WeightInit {
    pub const ALL: [WeightInit; 4] = [
        WeightInit::Random,
        WeightInit::Xavier,
        WeightInit::He,
        WeightInit::Lecun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WeightInit::Random => "random",
            WeightInit::Xavier => "xavier",
            WeightInit::He => "he",
            WeightInit::Lecun => "lecun",
        }
    }

    /// Draws a `(fan_in, fan_out)` weight matrix.
    pub fn sample<R: Rng + ?Sized>(&self, fan_in: usize, fan_out: usize, rng: &mut R) -> Matrix {
        let shape = (fan_in, fan_out);
        match self {
            WeightInit::Random => {
                Matrix::random_using(shape, Uniform::new_inclusive(-RANDOM_LIMIT, RANDOM_LIMIT), rng)
            }
            WeightInit::Xavier => {
                let limit = (6.0 / (fan_in + fan_out) as TensorData).sqrt();
                Matrix::random_using(shape, Uniform::new_inclusive(-limit, limit), rng)
            }
            WeightInit::He => {
                let scale = (2.0 / fan_in as TensorData).sqrt();
                Matrix::random_using(shape, StandardNormal, rng) * scale
            }
            WeightInit::Lecun => {
                let scale = (1.0 / fan_in as TensorData).sqrt();
                Matrix::random_using(shape, StandardNormal, rng) * scale
            }
        }
    }
}

impl FromStr for WeightInit {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        WeightInit::ALL
            .iter()
            .copied()
            .find(|init| init.name() == name)
            .ok_or_else(|| NetworkError::InvalidInitializationStrategy {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for WeightInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let w = WeightInit::Random.sample(30, 20, &mut rng);
        assert_eq!(w.dim(), (30, 20));
        assert!(w.iter().all(|&v| (-RANDOM_LIMIT..=RANDOM_LIMIT).contains(&v)));
    }

    #[test]
    fn test_xavier_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let w = WeightInit::Xavier.sample(100, 50, &mut rng);
        let limit = (6.0f64 / 150.0).sqrt();
        for &weight in w.iter() {
            assert!(
                weight >= -limit && weight <= limit,
                "Weight {} outside Xavier range [{}, {}]",
                weight,
                -limit,
                limit
            );
        }
    }

    #[test]
    fn test_he_and_lecun_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        let he = WeightInit::He.sample(200, 200, &mut rng);
        let lecun = WeightInit::Lecun.sample(200, 200, &mut rng);

        let std = |m: &Matrix| {
            let mean = m.mean().unwrap_or(0.0);
            (m.mapv(|v| (v - mean).powi(2)).mean().unwrap_or(0.0)).sqrt()
        };
        // 40k draws: sample std within a few percent of the target
        assert!((std(&he) - (2.0f64 / 200.0).sqrt()).abs() < 0.01);
        assert!((std(&lecun) - (1.0f64 / 200.0).sqrt()).abs() < 0.01);
    }

    #[test]
    fn test_same_seed_same_weights() {
        let a = WeightInit::Lecun.sample(4, 3, &mut StdRng::seed_from_u64(1));
        let b = WeightInit::Lecun.sample(4, 3, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse() {
        assert_eq!("xavier".parse::<WeightInit>(), Ok(WeightInit::Xavier));
        assert_eq!(
            "bogus".parse::<WeightInit>(),
            Err(NetworkError::InvalidInitializationStrategy {
                name: "bogus".to_string()
            })
        );
    }
}
