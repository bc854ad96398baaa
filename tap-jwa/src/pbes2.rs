//! PBES2 key wrapping (RFC 7518 Section 4.8)
//!
//! Protects a content encryption key with a key derived from a password. The
//! password is the `k` member of an `oct` JWK; the KEK is derived with PBKDF2
//! over `alg || 0x00 || p2s` and `p2c` iterations and then used with AES Key
//! Wrap.
//!
//! ```
//! use tap_jwa::{Jwk, KeyWrapping, Pbes2AesKw, Pbes2Variant};
//!
//! let algorithm = Pbes2AesKw::new(Pbes2Variant::Hs256A128kw);
//! let key = Jwk::new_oct(b"correct horse battery staple");
//! let headers = serde_json::json!({"alg": "PBES2-HS256+A128KW"})
//!     .as_object()
//!     .cloned()
//!     .unwrap();
//!
//! let cek = [7u8; 32];
//! let wrapped = algorithm.wrap_key(&key, &cek, &headers).unwrap();
//! let complete = wrapped.complete_headers(&headers);
//! let unwrapped = algorithm
//!     .unwrap_key(&key, &wrapped.encrypted_key, &complete)
//!     .unwrap();
//! assert_eq!(unwrapped, cek);
//! ```

use crate::algorithm::{JwaAlgorithm, KeyWrapping, WrappedKey};
use crate::config::{self, Pbes2Config, MIN_SALT_SIZE};
use crate::crypto::{
    derive_key_pbes2, unwrap_key_aes_kw, wrap_key_aes_kw, HashAlgorithm, KeyWrapCipher,
};
use crate::error::{Error, Result};
use crate::header::{self, JoseHeader};
use crate::jwk::{Jwk, KTY_OCT};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

/// The PBES2 variants defined by RFC 7518
///
/// Each variant fixes the PRF hash and the AES key wrap cipher; the derived
/// key length is the cipher's key size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pbes2Variant {
    /// PBES2 with HMAC SHA-256 and AES-128 key wrap
    Hs256A128kw,
    /// PBES2 with HMAC SHA-384 and AES-192 key wrap
    Hs384A192kw,
    /// PBES2 with HMAC SHA-512 and AES-256 key wrap
    Hs512A256kw,
}

impl Pbes2Variant {
    /// All variants, in registry order
    pub const ALL: [Pbes2Variant; 3] = [
        Pbes2Variant::Hs256A128kw,
        Pbes2Variant::Hs384A192kw,
        Pbes2Variant::Hs512A256kw,
    ];

    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Pbes2Variant::Hs256A128kw => "PBES2-HS256+A128KW",
            Pbes2Variant::Hs384A192kw => "PBES2-HS384+A192KW",
            Pbes2Variant::Hs512A256kw => "PBES2-HS512+A256KW",
        }
    }

    /// Parses an algorithm identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.as_str() == name)
    }

    /// Returns the PBKDF2 hash
    pub fn hash(&self) -> HashAlgorithm {
        match self {
            Pbes2Variant::Hs256A128kw => HashAlgorithm::Sha256,
            Pbes2Variant::Hs384A192kw => HashAlgorithm::Sha384,
            Pbes2Variant::Hs512A256kw => HashAlgorithm::Sha512,
        }
    }

    /// Returns the AES key wrap cipher
    pub fn cipher(&self) -> KeyWrapCipher {
        match self {
            Pbes2Variant::Hs256A128kw => KeyWrapCipher::A128KW,
            Pbes2Variant::Hs384A192kw => KeyWrapCipher::A192KW,
            Pbes2Variant::Hs512A256kw => KeyWrapCipher::A256KW,
        }
    }

    /// Returns the derived key length in bytes
    pub fn key_size(&self) -> usize {
        self.cipher().key_size()
    }
}

/// PBES2 + AES key wrap algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbes2AesKw {
    variant: Pbes2Variant,
    config: Pbes2Config,
}

impl Pbes2AesKw {
    /// Creates the algorithm with the default configuration
    pub fn new(variant: Pbes2Variant) -> Self {
        Self {
            variant,
            config: Pbes2Config::default(),
        }
    }

    /// Creates the algorithm with a custom configuration
    pub fn with_config(variant: Pbes2Variant, config: Pbes2Config) -> Result<Self> {
        config::validate(&config)?;
        Ok(Self { variant, config })
    }

    /// Returns the variant
    pub fn variant(&self) -> Pbes2Variant {
        self.variant
    }

    /// Returns the configuration
    pub fn config(&self) -> &Pbes2Config {
        &self.config
    }

    /// Wraps `cek` using a caller-supplied salt instead of a random one
    ///
    /// The output is deterministic for a given key, salt, CEK and `alg`.
    pub fn wrap_key_with_salt(
        &self,
        key: &Jwk,
        cek: &[u8],
        headers: &JoseHeader,
        salt: &[u8],
    ) -> Result<WrappedKey> {
        if salt.len() < MIN_SALT_SIZE {
            return Err(Error::InvalidConfig(format!(
                "Salt must be at least {} bytes, got {}",
                MIN_SALT_SIZE,
                salt.len()
            )));
        }
        let password = self.check_key(key)?;
        let alg = header::algorithm(headers)?;
        Self::check_cek(cek)?;
        self.wrap_with(&password, alg, cek, salt)
    }

    fn wrap_with(
        &self,
        password: &[u8],
        alg: &str,
        cek: &[u8],
        salt: &[u8],
    ) -> Result<WrappedKey> {
        let iterations = self.config.iteration_count;
        let derived = self.derive(password, alg, salt, iterations)?;
        let encrypted_key = wrap_key_aes_kw(self.variant.cipher(), &derived, cek)?;

        debug!(
            alg,
            salt_len = salt.len(),
            iterations,
            "Wrapped content encryption key with {}",
            self.variant.as_str()
        );

        Ok(WrappedKey {
            encrypted_key,
            additional_headers: header::pbes2_parameters(salt, iterations),
        })
    }

    fn derive(
        &self,
        password: &[u8],
        alg: &str,
        salt: &[u8],
        iterations: u32,
    ) -> Result<Zeroizing<Vec<u8>>> {
        derive_key_pbes2(
            self.variant.hash(),
            password,
            alg,
            salt,
            iterations,
            self.variant.key_size(),
        )
    }

    /// Checks the key type and returns the decoded password
    fn check_key(&self, key: &Jwk) -> Result<Zeroizing<Vec<u8>>> {
        if key.kty() != Some(KTY_OCT) {
            return Err(Error::InvalidKey("Wrong key type".to_string()));
        }
        if !key.has("k") {
            return Err(Error::InvalidKey(
                "The key parameter \"k\" is missing".to_string(),
            ));
        }
        let password = key.decode_param("k")?;
        if password.is_empty() {
            return Err(Error::InvalidKey(
                "The key parameter \"k\" is empty".to_string(),
            ));
        }
        Ok(password)
    }

    /// Checks a CEK can be wrapped before any work is done
    fn check_cek(cek: &[u8]) -> Result<()> {
        if cek.len() < 16 || cek.len() % 8 != 0 {
            return Err(Error::InvalidContentKey(format!(
                "AES key wrap needs at least 16 bytes in multiples of 8, got {}",
                cek.len()
            )));
        }
        Ok(())
    }
}

impl JwaAlgorithm for Pbes2AesKw {
    fn name(&self) -> &'static str {
        self.variant.as_str()
    }

    fn allowed_key_types(&self) -> &'static [&'static str] {
        &[KTY_OCT]
    }
}

impl KeyWrapping for Pbes2AesKw {
    fn wrap_key(&self, key: &Jwk, cek: &[u8], headers: &JoseHeader) -> Result<WrappedKey> {
        let password = self.check_key(key)?;
        let alg = header::algorithm(headers)?;
        Self::check_cek(cek)?;

        let mut salt = vec![0u8; self.config.salt_size];
        OsRng.fill_bytes(&mut salt);

        self.wrap_with(&password, alg, cek, &salt)
    }

    fn unwrap_key(
        &self,
        key: &Jwk,
        encrypted_key: &[u8],
        headers: &JoseHeader,
    ) -> Result<Vec<u8>> {
        let password = self.check_key(key)?;
        let alg = header::algorithm(headers)?;
        let salt = header::pbes2_salt(headers)?;
        let iterations = header::pbes2_count(headers)?;

        if iterations > self.config.max_iterations {
            return Err(Error::InvalidHeader(format!(
                "The header parameter \"{}\" exceeds the maximum of {} iterations",
                header::P2C,
                self.config.max_iterations
            )));
        }

        let derived = self.derive(&password, alg, &salt, iterations)?;
        let cek = unwrap_key_aes_kw(self.variant.cipher(), &derived, encrypted_key)?;

        debug!(
            alg,
            salt_len = salt.len(),
            iterations,
            "Unwrapped content encryption key with {}",
            self.variant.as_str()
        );

        Ok(cek)
    }
}
