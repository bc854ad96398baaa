//! AES Key Wrap per RFC 3394
//!
//! Wraps content encryption keys (CEK) under a key encryption key (KEK) with
//! the 128, 192 or 256-bit AES key wrap ciphers used by the JWA `A*KW`
//! algorithms.

use crate::error::{Error, Result};
use aes::{Aes128, Aes192, Aes256};
use aes_kw::Kek;

/// Length of the integrity check value prepended by AES-KW
pub const AES_KW_OVERHEAD: usize = 8;

/// AES key wrap cipher variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyWrapCipher {
    /// AES-128 key wrap
    A128KW,
    /// AES-192 key wrap
    A192KW,
    /// AES-256 key wrap
    A256KW,
}

impl KeyWrapCipher {
    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyWrapCipher::A128KW => "A128KW",
            KeyWrapCipher::A192KW => "A192KW",
            KeyWrapCipher::A256KW => "A256KW",
        }
    }

    /// Returns the KEK size in bytes
    pub fn key_size(&self) -> usize {
        match self {
            KeyWrapCipher::A128KW => 16,
            KeyWrapCipher::A192KW => 24,
            KeyWrapCipher::A256KW => 32,
        }
    }
}

fn kek_bytes<const N: usize>(kek: &[u8]) -> Result<[u8; N]> {
    kek.try_into().map_err(|_| {
        Error::Cryptography(format!(
            "Key encryption key must be {} bytes, got {}",
            N,
            kek.len()
        ))
    })
}

/// Wrap a key using AES-KW (RFC 3394)
///
/// # Arguments
/// * `cipher` - The AES key wrap variant
/// * `kek` - The Key Encryption Key, sized for `cipher`
/// * `plaintext_key` - The key to wrap (must be multiple of 8 bytes, minimum 16 bytes)
///
/// # Returns
/// The wrapped key (input length + 8 bytes for integrity check value)
pub fn wrap_key_aes_kw(
    cipher: KeyWrapCipher,
    kek: &[u8],
    plaintext_key: &[u8],
) -> Result<Vec<u8>> {
    if plaintext_key.len() < 16 {
        return Err(Error::InvalidContentKey(
            "Key to wrap must be at least 16 bytes".to_string(),
        ));
    }
    if plaintext_key.len() % 8 != 0 {
        return Err(Error::InvalidContentKey(
            "Key to wrap must be multiple of 8 bytes".to_string(),
        ));
    }

    let mut output = vec![0u8; plaintext_key.len() + AES_KW_OVERHEAD];
    let wrapped = match cipher {
        KeyWrapCipher::A128KW => {
            Kek::<Aes128>::from(kek_bytes::<16>(kek)?).wrap(plaintext_key, &mut output)
        }
        KeyWrapCipher::A192KW => {
            Kek::<Aes192>::from(kek_bytes::<24>(kek)?).wrap(plaintext_key, &mut output)
        }
        KeyWrapCipher::A256KW => {
            Kek::<Aes256>::from(kek_bytes::<32>(kek)?).wrap(plaintext_key, &mut output)
        }
    };
    wrapped.map_err(|e| Error::Cryptography(format!("Key wrap failed: {:?}", e)))?;

    Ok(output)
}

/// Unwrap a key using AES-KW (RFC 3394)
///
/// # Arguments
/// * `cipher` - The AES key wrap variant
/// * `kek` - The Key Encryption Key, sized for `cipher`
/// * `wrapped_key` - The wrapped key (must be input length + 8 bytes)
///
/// # Returns
/// The unwrapped plaintext key
///
/// # Security
/// The unwrap operation verifies the integrity check value (ICV) and will
/// return [`Error::UnwrapIntegrity`] if:
/// - The KEK is incorrect
/// - The wrapped key has been tampered with
/// - The wrapped key is malformed
pub fn unwrap_key_aes_kw(
    cipher: KeyWrapCipher,
    kek: &[u8],
    wrapped_key: &[u8],
) -> Result<Vec<u8>> {
    if wrapped_key.len() < 24 {
        return Err(Error::UnwrapIntegrity(
            "Wrapped key must be at least 24 bytes".to_string(),
        ));
    }
    if wrapped_key.len() % 8 != 0 {
        return Err(Error::UnwrapIntegrity(
            "Wrapped key must be multiple of 8 bytes".to_string(),
        ));
    }

    let mut output = vec![0u8; wrapped_key.len() - AES_KW_OVERHEAD];
    let unwrapped = match cipher {
        KeyWrapCipher::A128KW => {
            Kek::<Aes128>::from(kek_bytes::<16>(kek)?).unwrap(wrapped_key, &mut output)
        }
        KeyWrapCipher::A192KW => {
            Kek::<Aes192>::from(kek_bytes::<24>(kek)?).unwrap(wrapped_key, &mut output)
        }
        KeyWrapCipher::A256KW => {
            Kek::<Aes256>::from(kek_bytes::<32>(kek)?).unwrap(wrapped_key, &mut output)
        }
    };
    unwrapped.map_err(|e| Error::UnwrapIntegrity(format!("{:?}", e)))?;

    Ok(output)
}
