//! PBES2 key derivation (RFC 7518 Section 4.8.1.1)
//!
//! Derives a key encryption key (KEK) from a password with PBKDF2. The salt
//! fed to PBKDF2 is bound to the algorithm identifier so a derived key cannot
//! be replayed under a different algorithm label.

use crate::error::{Error, Result};
use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

/// Hash function used as the PBKDF2 pseudo-random function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// HMAC-SHA-256
    Sha256,
    /// HMAC-SHA-384
    Sha384,
    /// HMAC-SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Returns the hash name
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

/// Build the PBKDF2 salt input: `UTF8(alg) || 0x00 || salt`
pub fn pbes2_salt_input(alg: &str, salt: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(alg.len() + 1 + salt.len());
    input.extend_from_slice(alg.as_bytes());
    input.push(0x00);
    input.extend_from_slice(salt);
    input
}

/// Derive a PBES2 key encryption key
///
/// # Arguments
/// * `hash` - The PRF hash
/// * `password` - The raw password bytes
/// * `alg` - The `alg` header value the salt input is bound to
/// * `salt` - The raw `p2s` salt
/// * `iterations` - The `p2c` iteration count
/// * `key_len` - Output length in bytes
///
/// # Returns
/// The derived key of exactly `key_len` bytes, wiped on drop
pub fn derive_key_pbes2(
    hash: HashAlgorithm,
    password: &[u8],
    alg: &str,
    salt: &[u8],
    iterations: u32,
    key_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if iterations == 0 {
        return Err(Error::Cryptography(
            "PBKDF2 iteration count must be positive".to_string(),
        ));
    }
    if key_len == 0 {
        return Err(Error::Cryptography(
            "Derived key length must be positive".to_string(),
        ));
    }

    let salt_input = pbes2_salt_input(alg, salt);
    let mut derived = Zeroizing::new(vec![0u8; key_len]);

    match hash {
        HashAlgorithm::Sha256 => {
            pbkdf2_hmac::<Sha256>(password, &salt_input, iterations, derived.as_mut_slice())
        }
        HashAlgorithm::Sha384 => {
            pbkdf2_hmac::<Sha384>(password, &salt_input, iterations, derived.as_mut_slice())
        }
        HashAlgorithm::Sha512 => {
            pbkdf2_hmac::<Sha512>(password, &salt_input, iterations, derived.as_mut_slice())
        }
    }

    Ok(derived)
}
