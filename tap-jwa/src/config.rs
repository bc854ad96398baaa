//! Configuration for the PBES2 key-wrapping algorithms

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default salt size in bytes
pub const DEFAULT_SALT_SIZE: usize = 64;

/// Default PBKDF2 iteration count written to `p2c`
pub const DEFAULT_ITERATION_COUNT: u32 = 4096;

/// Default upper bound for a `p2c` value accepted on unwrap
pub const DEFAULT_MAX_ITERATIONS: u32 = 1_000_000;

/// Smallest salt accepted for wrapping (RFC 7518 section 4.8.1.1)
pub const MIN_SALT_SIZE: usize = 8;

/// Configuration options for a PBES2 algorithm instance
///
/// The values are fixed when the algorithm is constructed and never change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pbes2Config {
    /// Number of random salt bytes generated for each wrap
    pub salt_size: usize,

    /// PBKDF2 iteration count used when wrapping
    pub iteration_count: u32,

    /// Largest iteration count honored when unwrapping
    pub max_iterations: u32,
}

impl Pbes2Config {
    /// Creates a configuration with the default salt size and iteration counts
    pub fn new() -> Self {
        Self {
            salt_size: DEFAULT_SALT_SIZE,
            iteration_count: DEFAULT_ITERATION_COUNT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the salt size
    pub fn with_salt_size(mut self, salt_size: usize) -> Self {
        self.salt_size = salt_size;
        self
    }

    /// Sets the iteration count used for wrapping
    pub fn with_iteration_count(mut self, iteration_count: u32) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    /// Sets the largest iteration count accepted from an incoming header
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for Pbes2Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a PBES2 configuration
pub fn validate(config: &Pbes2Config) -> Result<()> {
    if config.salt_size < MIN_SALT_SIZE {
        return Err(Error::InvalidConfig(format!(
            "Salt size must be at least {} bytes, got {}",
            MIN_SALT_SIZE, config.salt_size
        )));
    }
    if config.iteration_count == 0 {
        return Err(Error::InvalidConfig(
            "Iteration count must be positive".to_string(),
        ));
    }
    if config.iteration_count > config.max_iterations {
        return Err(Error::InvalidConfig(format!(
            "Iteration count {} exceeds the configured maximum {}",
            config.iteration_count, config.max_iterations
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Pbes2Config::default();
        assert_eq!(config.salt_size, 64);
        assert_eq!(config.iteration_count, 4096);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_builders() {
        let config = Pbes2Config::new()
            .with_salt_size(16)
            .with_iteration_count(10_000)
            .with_max_iterations(20_000);
        assert_eq!(config.salt_size, 16);
        assert_eq!(config.iteration_count, 10_000);
        assert_eq!(config.max_iterations, 20_000);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_short_salt() {
        let config = Pbes2Config::new().with_salt_size(7);
        assert!(matches!(validate(&config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = Pbes2Config::new().with_iteration_count(0);
        assert!(matches!(validate(&config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_count_above_cap() {
        let config = Pbes2Config::new()
            .with_iteration_count(5000)
            .with_max_iterations(4096);
        assert!(matches!(validate(&config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Pbes2Config = serde_json::from_str(r#"{"iteration_count": 8192}"#).unwrap();
        assert_eq!(config.iteration_count, 8192);
        assert_eq!(config.salt_size, DEFAULT_SALT_SIZE);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
