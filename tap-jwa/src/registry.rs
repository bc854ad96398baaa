//! Algorithm registry
//!
//! Maps `alg` identifiers to the closed set of algorithms this crate
//! implements. Callers look algorithms up by identifier and receive them
//! behind a capability trait.

use crate::algorithm::{JwaAlgorithm, KeyWrapping, SignatureAlgorithm};
use crate::config::Pbes2Config;
use crate::error::{Error, Result};
use crate::pbes2::{Pbes2AesKw, Pbes2Variant};
use crate::signature::JwsAlgorithm;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Any algorithm known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// A key-wrapping algorithm
    KeyWrap(Pbes2AesKw),
    /// A signature algorithm
    Signature(JwsAlgorithm),
}

impl Algorithm {
    /// Returns the key-wrapping capability, if this is a key-wrapping algorithm
    pub fn as_key_wrapping(&self) -> Option<&dyn KeyWrapping> {
        match self {
            Algorithm::KeyWrap(alg) => Some(alg),
            Algorithm::Signature(_) => None,
        }
    }

    /// Returns the signature capability, if this is a signature algorithm
    pub fn as_signature(&self) -> Option<&dyn SignatureAlgorithm> {
        match self {
            Algorithm::Signature(alg) => Some(alg),
            Algorithm::KeyWrap(_) => None,
        }
    }
}

impl JwaAlgorithm for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Algorithm::KeyWrap(alg) => alg.name(),
            Algorithm::Signature(alg) => alg.name(),
        }
    }

    fn allowed_key_types(&self) -> &'static [&'static str] {
        match self {
            Algorithm::KeyWrap(alg) => alg.allowed_key_types(),
            Algorithm::Signature(alg) => alg.allowed_key_types(),
        }
    }
}

impl From<Pbes2AesKw> for Algorithm {
    fn from(alg: Pbes2AesKw) -> Self {
        Algorithm::KeyWrap(alg)
    }
}

impl From<JwsAlgorithm> for Algorithm {
    fn from(alg: JwsAlgorithm) -> Self {
        Algorithm::Signature(alg)
    }
}

/// Registry of algorithms keyed by identifier
#[derive(Clone)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, Algorithm>,
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}

impl AlgorithmRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Get the shared registry holding the default algorithms
    pub fn global() -> &'static AlgorithmRegistry {
        static REGISTRY: Lazy<AlgorithmRegistry> = Lazy::new(AlgorithmRegistry::new_with_defaults);
        &REGISTRY
    }

    /// Create a registry with every algorithm using default settings
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();
        for variant in Pbes2Variant::ALL {
            registry.register(Pbes2AesKw::new(variant));
        }
        for alg in JwsAlgorithm::ALL {
            registry.register(alg);
        }
        trace!(count = registry.len(), "Created default algorithm registry");
        registry
    }

    /// Create a registry whose PBES2 algorithms use `config`
    pub fn with_pbes2_config(config: Pbes2Config) -> Result<Self> {
        let mut registry = Self::new_with_defaults();
        for variant in Pbes2Variant::ALL {
            registry.register(Pbes2AesKw::with_config(variant, config)?);
        }
        Ok(registry)
    }

    /// Register an algorithm under its identifier, replacing any previous entry
    pub fn register(&mut self, algorithm: impl Into<Algorithm>) {
        let algorithm = algorithm.into();
        self.algorithms
            .insert(algorithm.name().to_string(), algorithm);
    }

    /// Get an algorithm by identifier
    pub fn get(&self, name: &str) -> Option<&Algorithm> {
        self.algorithms.get(name)
    }

    /// Get a key-wrapping algorithm by identifier
    pub fn key_wrapping(&self, name: &str) -> Result<&dyn KeyWrapping> {
        self.get(name)
            .and_then(Algorithm::as_key_wrapping)
            .ok_or_else(|| {
                Error::UnsupportedAlgorithm(format!("{} is not a key-wrapping algorithm", name))
            })
    }

    /// Get a signature algorithm by identifier
    pub fn signature(&self, name: &str) -> Result<&dyn SignatureAlgorithm> {
        self.get(name)
            .and_then(Algorithm::as_signature)
            .ok_or_else(|| {
                Error::UnsupportedAlgorithm(format!("{} is not a signature algorithm", name))
            })
    }

    /// Returns the registered identifiers, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.algorithms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered algorithms
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Returns true if no algorithm is registered
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}
