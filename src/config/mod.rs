/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Configuration of the evaluation pipeline

pub mod errors;

pub use errors::{ConfigError, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Evaluation pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Whether grid points may be evaluated on the rayon thread pool
    pub parallel: bool,
    /// Smallest batch that is evaluated in parallel
    pub parallel_threshold: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 4096,
        }
    }
}

impl EvaluationConfig {
    /// Always evaluate sequentially
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EvaluationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Whether a batch of `n_points` runs on the thread pool
    pub fn runs_parallel(&self, n_points: usize) -> bool {
        self.parallel && n_points >= self.parallel_threshold
    }

    fn validate(&self) -> Result<()> {
        if self.parallel && self.parallel_threshold == 0 {
            return Err(ConfigError::Invalid(
                "parallel_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
