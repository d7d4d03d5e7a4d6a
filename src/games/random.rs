//! Uniform random sources
//!
//! Rounds draw a single value in [0, 1). Production uses the OS CSPRNG;
//! tests and reproducible runs inject a seeded or scripted source instead.

use crate::config::{RandomConfig, RandomSourceKind};
use crate::errors::RandomSourceError;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_core::{OsRng, RngCore};

/// Source of uniform values in [0, 1)
pub trait RandomSource {
    fn next_uniform(&mut self) -> Result<f64, RandomSourceError>;

    fn describe(&self) -> String;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_uniform(&mut self) -> Result<f64, RandomSourceError> {
        (**self).next_uniform()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Map 64 random bits onto [0, 1) using the top 53 bits
fn bits_to_unit(bits: u64) -> f64 {
    (bits >> 11) as f64 / (1u64 << 53) as f64
}

/// Operating-system CSPRNG. The only source that can fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureRandom;

impl RandomSource for SecureRandom {
    fn next_uniform(&mut self) -> Result<f64, RandomSourceError> {
        let mut buf = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| RandomSourceError(e.to_string()))?;
        Ok(bits_to_unit(u64::from_le_bytes(buf)))
    }

    fn describe(&self) -> String {
        "secure (os)".to_string()
    }
}

/// Deterministic generator for reproducible sessions and simulations
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_uniform(&mut self) -> Result<f64, RandomSourceError> {
        Ok(self.rng.gen::<f64>())
    }

    fn describe(&self) -> String {
        format!("seeded ({})", self.seed)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_uniform(&mut self) -> Result<f64, RandomSourceError> {
        if self.values.is_empty() {
            return Err(RandomSourceError("sequence is empty".to_string()));
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        Ok(value)
    }

    fn describe(&self) -> String {
        format!("sequence ({} values)", self.values.len())
    }
}

/// Build the source selected in configuration.
pub fn from_config(config: &RandomConfig) -> Result<Box<dyn RandomSource>, RandomSourceError> {
    match config.source {
        RandomSourceKind::Secure => Ok(Box::new(SecureRandom)),
        RandomSourceKind::Seeded => {
            let seed = config
                .seed
                .ok_or_else(|| RandomSourceError("seeded source requires a seed".to_string()))?;
            Ok(Box::new(SeededRandom::new(seed)))
        }
    }
}
