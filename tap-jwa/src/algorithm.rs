//! Algorithm capability traits
//!
//! Every JWA algorithm exposes its identifier and the key types it accepts
//! through [`JwaAlgorithm`]. The narrow capability traits built on top of it
//! ([`KeyWrapping`], [`SignatureAlgorithm`]) are what callers program
//! against, so they never depend on a concrete algorithm type.

use crate::error::Result;
use crate::header::JoseHeader;
use crate::jwk::Jwk;
use std::fmt::{self, Debug};

/// Defines the properties shared by all JWA algorithms.
pub trait JwaAlgorithm: Send + Sync + Debug {
    /// Returns the algorithm identifier (the `alg` header value)
    fn name(&self) -> &'static str;

    /// Returns the key types (`kty`) this algorithm accepts
    fn allowed_key_types(&self) -> &'static [&'static str];
}

/// How a key-management algorithm determines the content encryption key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyManagementMode {
    /// The CEK is encrypted to the recipient
    KeyEncryption,
    /// An independently generated CEK is wrapped with a symmetric key
    KeyWrap,
    /// A shared symmetric key is used directly as the CEK
    DirectEncryption,
    /// The CEK is the output of a key agreement
    KeyAgreement,
}

impl KeyManagementMode {
    /// Returns the mode identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyManagementMode::KeyEncryption => "enc",
            KeyManagementMode::KeyWrap => "wrap",
            KeyManagementMode::DirectEncryption => "dir",
            KeyManagementMode::KeyAgreement => "agree",
        }
    }
}

impl fmt::Display for KeyManagementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of wrapping a content encryption key
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedKey {
    /// The wrapped CEK (the JWE `encrypted_key`)
    pub encrypted_key: Vec<u8>,
    /// Header parameters the recipient needs to unwrap the key
    pub additional_headers: JoseHeader,
}

impl WrappedKey {
    /// Returns `headers` extended with the additional header parameters
    pub fn complete_headers(&self, headers: &JoseHeader) -> JoseHeader {
        let mut complete = headers.clone();
        complete.extend(self.additional_headers.clone());
        complete
    }
}

/// Algorithm capable of wrapping and unwrapping content encryption keys.
pub trait KeyWrapping: JwaAlgorithm {
    /// Wraps `cek` with `key`
    ///
    /// # Arguments
    /// * `key` - The key encryption key
    /// * `cek` - The content encryption key to protect
    /// * `headers` - The complete JOSE header of the message
    ///
    /// # Returns
    /// The wrapped key and the header parameters produced while wrapping
    fn wrap_key(&self, key: &Jwk, cek: &[u8], headers: &JoseHeader) -> Result<WrappedKey>;

    /// Recovers the content encryption key from `encrypted_key`
    fn unwrap_key(&self, key: &Jwk, encrypted_key: &[u8], headers: &JoseHeader)
        -> Result<Vec<u8>>;

    /// Returns the key management mode of the algorithm
    fn key_management_mode(&self) -> KeyManagementMode {
        KeyManagementMode::KeyWrap
    }
}

/// Algorithm capable of signing data and verifying signatures.
pub trait SignatureAlgorithm: JwaAlgorithm {
    /// Signs `input` with `key`
    fn sign(&self, key: &Jwk, input: &[u8]) -> Result<Vec<u8>>;

    /// Verifies `signature` over `input` with `key`
    ///
    /// Returns `Ok(false)` for a well-formed key and a signature that does not
    /// match; key problems are reported as errors.
    fn verify(&self, key: &Jwk, input: &[u8], signature: &[u8]) -> Result<bool>;
}
