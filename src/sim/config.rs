//! Configuration options for the simulation engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Trials per estimation when nothing else is configured.
pub const DEFAULT_TRIALS: u64 = 10_000;

/// Trials handed to one worker at a time.
pub const DEFAULT_BATCH_SIZE: u64 = 1_000;

/// Configuration for Monte Carlo estimation.
///
/// # Example
/// ```
/// use poker_odds::sim::SimConfig;
///
/// let config = SimConfig::default().with_trials(50_000).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulated completions per estimation.
    pub trials: u64,

    /// Trials per batch. Cancellation and progress are checked between
    /// batches, so smaller batches respond faster.
    pub batch_size: u64,

    /// Worker threads. `None` uses the global rayon pool (all cores).
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// With a seed, repeated estimations over the same state return identical
    /// results regardless of thread count. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Stop scheduling batches after this many milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            batch_size: DEFAULT_BATCH_SIZE,
            num_threads: None,
            seed: None,
            timeout_ms: None,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the trial count.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set the batch size.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Number of batches the trials split into.
    pub fn num_batches(&self) -> u64 {
        self.trials.div_ceil(self.batch_size.max(1))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidValue {
                field: "trials",
                message: "must be at least 1".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "batch_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "num_threads",
                message: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.num_batches(), 10);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimConfig::new()
            .with_trials(2_500)
            .with_batch_size(1_000)
            .with_threads(2)
            .with_seed(42)
            .with_timeout_ms(500);
        assert_eq!(config.num_batches(), 3);
        assert_eq!(config.num_threads, Some(2));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_validation() {
        assert!(SimConfig::default().with_trials(0).validate().is_err());
        assert!(SimConfig::default().with_batch_size(0).validate().is_err());
        assert!(SimConfig::default().with_threads(0).validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let config = SimConfig::from_json_str(r#"{ "trials": 200000, "seed": 3 }"#).unwrap();
        assert_eq!(config.trials, 200_000);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);

        assert!(matches!(
            SimConfig::from_json_str(r#"{ "trials": 0 }"#),
            Err(ConfigError::InvalidValue { field: "trials", .. })
        ));
        assert!(matches!(
            SimConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimConfig::from_json_file("/nonexistent/odds.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
