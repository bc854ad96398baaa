//! Error handling for TAP JWA
//!
//! This module provides the error type shared by the key-wrapping and
//! signature algorithms.

use thiserror::Error;

/// Type alias for Results with TAP JWA errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for TAP JWA
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key has the wrong type or lacks required key material
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A required header parameter is missing or malformed
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The AES key wrap integrity check rejected the wrapped key
    #[error("Key unwrap failed: {0}")]
    UnwrapIntegrity(String),

    /// The content encryption key cannot be wrapped with AES-KW
    #[error("Invalid content encryption key: {0}")]
    InvalidContentKey(String),

    /// Algorithm configuration was rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No algorithm with the requested identifier is available
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Error related to cryptographic primitives
    #[error("Cryptography error: {0}")]
    Cryptography(String),
}
