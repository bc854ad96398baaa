//! TAP JWA implementation
//!
//! This crate provides JSON Web Algorithms (RFC 7518) for the Transaction
//! Authorization Protocol (TAP): the PBES2 + AES key wrap family used to
//! protect content encryption keys with a password, and the JWS signature
//! algorithms. Algorithms are looked up by identifier in an
//! [`AlgorithmRegistry`] and used through the [`KeyWrapping`] and
//! [`SignatureAlgorithm`] capabilities.

/// Algorithm capability traits
pub mod algorithm;

/// PBES2 configuration
pub mod config;

/// Cryptographic primitives
pub mod crypto;

/// Error types
pub mod error;

/// JOSE header parameters
pub mod header;

/// JSON Web Keys
pub mod jwk;

/// PBES2 key wrapping
pub mod pbes2;

/// Algorithm registry
pub mod registry;

/// JWS signature algorithms
pub mod signature;

// Re-export key types for convenience
pub use algorithm::{JwaAlgorithm, KeyManagementMode, KeyWrapping, SignatureAlgorithm, WrappedKey};
pub use config::Pbes2Config;
pub use error::{Error, Result};
pub use header::JoseHeader;
pub use jwk::Jwk;
pub use pbes2::{Pbes2AesKw, Pbes2Variant};
pub use registry::{Algorithm, AlgorithmRegistry};
pub use signature::JwsAlgorithm;

/// Version of TAP JWA
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
