//! Cryptographic primitives for TAP JWA
//!
//! This module provides:
//! - PBES2 key derivation (PBKDF2 with an algorithm-bound salt input)
//! - AES Key Wrap per RFC 3394
//!
//! These primitives back the PBES2 key-wrapping algorithms.

mod kdf;
mod key_wrap;

pub use kdf::{derive_key_pbes2, pbes2_salt_input, HashAlgorithm};
pub use key_wrap::{unwrap_key_aes_kw, wrap_key_aes_kw, KeyWrapCipher, AES_KW_OVERHEAD};
