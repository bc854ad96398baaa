//! JSON Web Key view used by the JWA algorithms
//!
//! A [`Jwk`] wraps the JSON object of a key and exposes the members the
//! algorithms read. It does not validate the key as a whole; each algorithm
//! checks the members it needs.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Key type of symmetric octet-sequence keys
pub const KTY_OCT: &str = "oct";
/// Key type of octet key pairs (Ed25519)
pub const KTY_OKP: &str = "OKP";
/// Key type of elliptic curve keys
pub const KTY_EC: &str = "EC";

/// Members that hold private key material
const PRIVATE_MEMBERS: [&str; 2] = ["d", "k"];

/// A JSON Web Key (RFC 7517)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jwk(Map<String, Value>);

impl Jwk {
    /// Wraps an existing JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Parses a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidKey(format!(
                "JWK must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// Creates an `oct` key holding the given secret
    pub fn new_oct(secret: &[u8]) -> Self {
        let mut map = Map::new();
        map.insert("kty".to_string(), Value::from(KTY_OCT));
        map.insert("k".to_string(), Value::from(URL_SAFE_NO_PAD.encode(secret)));
        Self(map)
    }

    /// Generates an `oct` key with `len` random bytes
    pub fn generate_oct(len: usize) -> Self {
        let mut secret = Zeroizing::new(vec![0u8; len]);
        OsRng.fill_bytes(&mut secret);
        Self::new_oct(&secret)
    }

    /// Generates an Ed25519 key pair
    pub fn generate_ed25519() -> Self {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
        let public_key = signing_key.verifying_key().to_bytes();
        let private_key = Zeroizing::new(signing_key.to_bytes());

        Self::from_json(serde_json::json!({
            "kty": KTY_OKP,
            "crv": "Ed25519",
            "x": URL_SAFE_NO_PAD.encode(public_key),
            "d": URL_SAFE_NO_PAD.encode(private_key.as_slice()),
        }))
    }

    /// Generates a P-256 key pair
    pub fn generate_p256() -> Self {
        let signing_key = p256::ecdsa::SigningKey::random(&mut OsRng);
        let private_key = Zeroizing::new(signing_key.to_bytes().to_vec());
        let point = p256::PublicKey::from(signing_key.verifying_key()).to_encoded_point(false);

        Self::ec_from_parts("P-256", point.as_bytes(), &private_key)
    }

    /// Generates a secp256k1 key pair
    pub fn generate_secp256k1() -> Self {
        let signing_key = k256::ecdsa::SigningKey::random(&mut OsRng);
        let private_key = Zeroizing::new(signing_key.to_bytes().to_vec());
        let point = k256::PublicKey::from(signing_key.verifying_key()).to_encoded_point(false);

        Self::ec_from_parts("secp256k1", point.as_bytes(), &private_key)
    }

    // `point` is an uncompressed SEC1 point: 0x04 || x || y
    fn ec_from_parts(crv: &str, point: &[u8], private_key: &[u8]) -> Self {
        let (x, y) = point[1..].split_at((point.len() - 1) / 2);
        Self::from_json(serde_json::json!({
            "kty": KTY_EC,
            "crv": crv,
            "x": URL_SAFE_NO_PAD.encode(x),
            "y": URL_SAFE_NO_PAD.encode(y),
            "d": URL_SAFE_NO_PAD.encode(private_key),
        }))
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Returns the key type (`kty`)
    pub fn kty(&self) -> Option<&str> {
        self.get_str("kty")
    }

    /// Returns the curve (`crv`)
    pub fn crv(&self) -> Option<&str> {
        self.get_str("crv")
    }

    /// Returns true if the member is present
    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns a member
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a member if it is a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_str())
    }

    /// Decodes a required base64url member into bytes
    pub fn decode_param(&self, name: &str) -> Result<Zeroizing<Vec<u8>>> {
        let encoded = match self.0.get(name) {
            Some(Value::String(s)) => s,
            Some(_) => {
                return Err(Error::InvalidKey(format!(
                    "The key parameter \"{}\" is not a string",
                    name
                )))
            }
            None => {
                return Err(Error::InvalidKey(format!(
                    "The key parameter \"{}\" is missing",
                    name
                )))
            }
        };

        URL_SAFE_NO_PAD
            .decode(encoded)
            .map(Zeroizing::new)
            .map_err(|e| {
                Error::InvalidKey(format!(
                    "The key parameter \"{}\" is not valid base64url: {}",
                    name, e
                ))
            })
    }

    /// Returns a copy without private key members
    pub fn to_public(&self) -> Jwk {
        let mut map = self.0.clone();
        for member in PRIVATE_MEMBERS {
            map.remove(member);
        }
        Self(map)
    }

    /// Borrows the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for Jwk {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}
