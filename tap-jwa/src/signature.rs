//! JWS signature algorithms (RFC 7518 Section 3)
//!
//! [`JwsAlgorithm`] is the closed set of signature algorithms behind the
//! [`SignatureAlgorithm`] capability. Signatures use the JWS encodings: the raw
//! MAC for `HS*`, 64 bytes for Ed25519, and the fixed-size `r || s` form for
//! ECDSA.

use crate::algorithm::{JwaAlgorithm, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::jwk::{Jwk, KTY_EC, KTY_OCT, KTY_OKP};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use p256::ecdsa::signature::{Signer, Verifier};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;

/// JWS algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JwsAlgorithm {
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// Ed25519 signatures
    EdDSA,
    /// P-256 ECDSA signatures
    ES256,
    /// secp256k1 ECDSA signatures
    ES256K,
}

impl JwsAlgorithm {
    /// All signature algorithms, in registry order
    pub const ALL: [JwsAlgorithm; 6] = [
        JwsAlgorithm::HS256,
        JwsAlgorithm::HS384,
        JwsAlgorithm::HS512,
        JwsAlgorithm::EdDSA,
        JwsAlgorithm::ES256,
        JwsAlgorithm::ES256K,
    ];

    /// Returns the algorithm identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            JwsAlgorithm::HS256 => "HS256",
            JwsAlgorithm::HS384 => "HS384",
            JwsAlgorithm::HS512 => "HS512",
            JwsAlgorithm::EdDSA => "EdDSA",
            JwsAlgorithm::ES256 => "ES256",
            JwsAlgorithm::ES256K => "ES256K",
        }
    }

    /// Parses an algorithm identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.as_str() == name)
    }
}

impl fmt::Display for JwsAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JwaAlgorithm for JwsAlgorithm {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn allowed_key_types(&self) -> &'static [&'static str] {
        match self {
            JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => &[KTY_OCT],
            JwsAlgorithm::EdDSA => &[KTY_OKP],
            JwsAlgorithm::ES256 | JwsAlgorithm::ES256K => &[KTY_EC],
        }
    }
}

impl SignatureAlgorithm for JwsAlgorithm {
    fn sign(&self, key: &Jwk, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            JwsAlgorithm::HS256 => hmac_sign::<Hmac<Sha256>>(&hmac_secret(key)?, input),
            JwsAlgorithm::HS384 => hmac_sign::<Hmac<Sha384>>(&hmac_secret(key)?, input),
            JwsAlgorithm::HS512 => hmac_sign::<Hmac<Sha512>>(&hmac_secret(key)?, input),
            JwsAlgorithm::EdDSA => {
                check_key(key, KTY_OKP, "Ed25519")?;
                let private_key = fixed_param::<32>(key, "d")?;
                let signing_key = ed25519_dalek::SigningKey::from_bytes(&private_key);
                Ok(signing_key.sign(input).to_bytes().to_vec())
            }
            JwsAlgorithm::ES256 => {
                check_key(key, KTY_EC, "P-256")?;
                let private_key = key.decode_param("d")?;
                let signing_key = p256::ecdsa::SigningKey::from_slice(&private_key)
                    .map_err(|e| Error::InvalidKey(format!("Invalid P-256 private key: {}", e)))?;
                let signature: p256::ecdsa::Signature = signing_key.sign(input);
                Ok(signature.to_bytes().to_vec())
            }
            JwsAlgorithm::ES256K => {
                check_key(key, KTY_EC, "secp256k1")?;
                let private_key = key.decode_param("d")?;
                let signing_key = k256::ecdsa::SigningKey::from_slice(&private_key).map_err(|e| {
                    Error::InvalidKey(format!("Invalid secp256k1 private key: {}", e))
                })?;
                let signature: k256::ecdsa::Signature = signing_key.sign(input);
                Ok(signature.to_bytes().to_vec())
            }
        }
    }

    fn verify(&self, key: &Jwk, input: &[u8], signature: &[u8]) -> Result<bool> {
        match self {
            JwsAlgorithm::HS256 => {
                hmac_verify::<Hmac<Sha256>>(&hmac_secret(key)?, input, signature)
            }
            JwsAlgorithm::HS384 => {
                hmac_verify::<Hmac<Sha384>>(&hmac_secret(key)?, input, signature)
            }
            JwsAlgorithm::HS512 => {
                hmac_verify::<Hmac<Sha512>>(&hmac_secret(key)?, input, signature)
            }
            JwsAlgorithm::EdDSA => {
                check_key(key, KTY_OKP, "Ed25519")?;
                let public_key = fixed_param::<32>(key, "x")?;
                let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&public_key)
                    .map_err(|e| Error::InvalidKey(format!("Invalid Ed25519 public key: {}", e)))?;
                let signature = match ed25519_dalek::Signature::from_slice(signature) {
                    Ok(signature) => signature,
                    Err(_) => return Ok(false),
                };
                Ok(verifying_key.verify(input, &signature).is_ok())
            }
            JwsAlgorithm::ES256 => {
                check_key(key, KTY_EC, "P-256")?;
                let point = ec_point(key)?;
                let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&point)
                    .map_err(|e| Error::InvalidKey(format!("Invalid P-256 public key: {}", e)))?;
                let signature = match p256::ecdsa::Signature::from_slice(signature) {
                    Ok(signature) => signature,
                    Err(_) => return Ok(false),
                };
                Ok(verifying_key.verify(input, &signature).is_ok())
            }
            JwsAlgorithm::ES256K => {
                check_key(key, KTY_EC, "secp256k1")?;
                let point = ec_point(key)?;
                let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|e| {
                    Error::InvalidKey(format!("Invalid secp256k1 public key: {}", e))
                })?;
                let signature = match k256::ecdsa::Signature::from_slice(signature) {
                    Ok(signature) => signature,
                    Err(_) => return Ok(false),
                };
                Ok(verifying_key.verify(input, &signature).is_ok())
            }
        }
    }
}

fn check_key(key: &Jwk, kty: &str, crv: &str) -> Result<()> {
    if key.kty() != Some(kty) || key.crv() != Some(crv) {
        return Err(Error::InvalidKey(format!(
            "Unsupported key type: kty={:?}, crv={:?}, expected {} {}",
            key.kty(),
            key.crv(),
            kty,
            crv
        )));
    }
    Ok(())
}

fn hmac_secret(key: &Jwk) -> Result<zeroize::Zeroizing<Vec<u8>>> {
    if key.kty() != Some(KTY_OCT) {
        return Err(Error::InvalidKey("Wrong key type".to_string()));
    }
    let secret = key.decode_param("k")?;
    if secret.is_empty() {
        return Err(Error::InvalidKey(
            "The key parameter \"k\" is empty".to_string(),
        ));
    }
    Ok(secret)
}

fn fixed_param<const N: usize>(key: &Jwk, name: &str) -> Result<[u8; N]> {
    let bytes = key.decode_param(name)?;
    bytes.as_slice().try_into().map_err(|_| {
        Error::InvalidKey(format!(
            "The key parameter \"{}\" must be {} bytes, got {}",
            name,
            N,
            bytes.len()
        ))
    })
}

// Uncompressed SEC1 encoding: 0x04 || x || y
fn ec_point(key: &Jwk) -> Result<Vec<u8>> {
    let x = key.decode_param("x")?;
    let y = key.decode_param("y")?;
    let mut point = Vec::with_capacity(1 + x.len() + y.len());
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);
    Ok(point)
}

fn hmac_sign<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| Error::InvalidKey(format!("Invalid HMAC key: {}", e)))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hmac_verify<M: Mac + KeyInit>(
    secret: &[u8],
    input: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| Error::InvalidKey(format!("Invalid HMAC key: {}", e)))?;
    mac.update(input);
    Ok(mac.verify_slice(signature).is_ok())
}
